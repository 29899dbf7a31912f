use doi_report_builder::{
    generate_unit_report, unit_layout, CellValue, CsvSink, InterestType, ReportSink, RowKind,
    RowTable, Scalar, SourceBook,
};

fn t(s: &str) -> Scalar {
    Scalar::from(s)
}

fn n(v: f64) -> Scalar {
    Scalar::from(v)
}

fn main() -> anyhow::Result<()> {
    let headers: Vec<String> = [
        "OWNER",
        "TYPE",
        "TRACT",
        "LEASE NO.",
        "REQ",
        "DECIMAL INTEREST",
        "LEASE ROYALTY",
        "NPRI BURDENS",
        "NPRI",
        "INTEREST BURDENED",
        "SHARE OF NPRI",
        "ORI BURDENS",
        "TRACT NRI",
        "NET ACRES",
        "Burdened WI Owners",
        "Legal Description",
        "Tract Gross Acres",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let legal_1 = "Howard County, Section 4, Block 33";
    let legal_2 = "Howard County, Section 5, Block 33";

    let rows = vec![
        vec![
            t("Hargrove Trust"),
            t("MI"),
            t("1"),
            t("WD-1"),
            t(""),
            n(1.0),
            n(0.1875),
            n(0.0),
            t(""),
            t(""),
            t(""),
            n(0.0),
            n(0.1875),
            n(320.0),
            t("Caprock Energy"),
            t(legal_1),
            n(320.0),
        ],
        vec![
            t("Caprock Energy"),
            t("WI"),
            t("1"),
            t("WD-1"),
            t(""),
            n(1.0),
            n(0.0),
            n(0.0),
            t(""),
            t(""),
            t(""),
            n(0.0),
            n(0.8125),
            n(320.0),
            t(""),
            t(legal_1),
            n(320.0),
        ],
        vec![
            t("Hargrove Trust"),
            t("MI"),
            t("2"),
            t("WD-2"),
            t(""),
            n(0.5),
            n(0.25),
            n(0.0),
            t(""),
            t(""),
            t(""),
            n(0.0),
            n(0.125),
            n(96.0),
            t("Caprock Energy"),
            t(legal_2),
            n(192.0),
        ],
        // Ellison's half is burdened by a 1/16 NPRI carved out for Vera.
        vec![
            t("Ellison Minerals"),
            t("MI"),
            t("2"),
            t("WD-2"),
            t(""),
            n(0.5),
            n(0.25),
            n(0.0625),
            t(""),
            t(""),
            t(""),
            n(0.0),
            n(0.09375),
            n(96.0),
            t("Caprock Energy"),
            t(legal_2),
            n(192.0),
        ],
        vec![
            t("Vera Ellison"),
            t("NPRI"),
            t("2"),
            t("WD-2"),
            t(""),
            n(0.0625),
            n(0.0),
            n(0.0),
            n(0.0625),
            n(0.5),
            n(1.0),
            n(0.0),
            n(0.03125),
            n(0.0),
            t("Ellison Minerals"),
            t(legal_2),
            n(192.0),
        ],
        vec![
            t("Caprock Energy"),
            t("WI"),
            t("2"),
            t("WD-2"),
            t(""),
            n(1.0),
            n(0.0),
            n(0.0),
            t(""),
            t(""),
            t(""),
            n(0.0),
            n(0.75),
            n(192.0),
            t(""),
            t(legal_2),
            n(192.0),
        ],
    ];

    let mut source = SourceBook::new();
    source.push(RowTable::new("Combined", headers, rows));
    source.push(RowTable::new(
        "Tract List",
        vec![
            "Tract".to_string(),
            "Legal Description".to_string(),
            "Acres".to_string(),
            "Allocation".to_string(),
        ],
        vec![
            vec![t("1"), t(legal_1), n(320.0), n(0.625)],
            vec![t("2"), t(legal_2), n(192.0), n(0.375)],
        ],
    ));

    let outcome = generate_unit_report(&source)?;

    println!(
        "Unit NRI total: {:.8} (conserved: {})",
        outcome.conservation.total_unit_nri,
        outcome.conservation.is_conserved()
    );
    for warning in &outcome.conservation.warnings {
        println!("Warning: {}", warning);
    }

    // Each owner block on a category sheet ends with that owner's share of
    // unit production.
    println!("Owner totals by category:");
    for interest_type in InterestType::ALL {
        let sheet = match outcome.book.sheet(interest_type.sheet_name()) {
            Some(sheet) => sheet,
            None => continue,
        };
        let total_column = unit_layout(interest_type).total_column;
        let mut owner = String::new();
        for row in &sheet.rows {
            if row.kind == RowKind::BlockLabel && row.cells[0].render() == "Owner Name:" {
                owner = row.cells[1].render();
            }
            if row.kind == RowKind::Totals {
                if let CellValue::Number(total) = row.cells[total_column].value {
                    println!(
                        " - {:<5} {:<20} {:.8}",
                        interest_type.sheet_name(),
                        owner,
                        total
                    );
                }
            }
        }
    }

    let bytes = CsvSink::default().render(&outcome.book)?;
    std::fs::write("west_dome_unit.csv", bytes)?;
    println!("Full report written to west_dome_unit.csv");
    Ok(())
}
