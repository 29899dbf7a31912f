use doi_report_builder::*;

fn t(s: &str) -> Scalar {
    Scalar::from(s)
}

fn n(v: f64) -> Scalar {
    Scalar::from(v)
}

fn main() {
    println!("🗺️  Tract-Based Ownership Report Demo\n");
    println!("This builds the per-tract view of a two-tract unit: every sheet groups");
    println!("records by tract, shows the NRI derivation for each owner, and the recap");
    println!("proves each tract's interests account for 100% of the tract.\n");

    let headers: Vec<String> = [
        "OWNER",
        "TYPE",
        "TRACT",
        "LEASE NO.",
        "REQ",
        "DECIMAL INTEREST",
        "LEASE ROYALTY",
        "NPRI BURDENS",
        "ORI BURDENS",
        "TRACT NRI",
        "NET ACRES",
        "Legal Description",
        "Tract Gross Acres",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let legal_1 = "Howard County, Section 4, Block 33";
    let legal_2 = "Howard County, Section 5, Block 33";

    let rows = vec![
        // Tract 1: single mineral owner, 3/16 royalty, one working-interest
        // company holding the remainder.
        vec![
            t("Hargrove Trust"),
            t("MI"),
            t("1"),
            t("WD-1"),
            t(""),
            n(1.0),
            n(0.1875),
            n(0.0),
            n(0.0),
            n(0.1875),
            n(320.0),
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
            n(0.0),
            n(0.8125),
            n(320.0),
            t(legal_1),
            n(320.0),
        ],
        // Tract 2: minerals split between two owners under a 1/4 royalty.
        vec![
            t("Hargrove Trust"),
            t("MI"),
            t("2"),
            t("WD-2"),
            t("Curative: heirship affidavit"),
            n(0.5),
            n(0.25),
            n(0.0),
            n(0.0),
            n(0.125),
            n(96.0),
            t(legal_2),
            n(192.0),
        ],
        vec![
            t("Ellison Minerals"),
            t("MI"),
            t("2"),
            t("WD-2"),
            t(""),
            n(0.5),
            n(0.25),
            n(0.0),
            n(0.0),
            n(0.125),
            n(96.0),
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
            n(0.0),
            n(0.75),
            n(192.0),
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

    println!("📋 Configuration:");
    println!("  Tract 1: 320.00 acres, lease WD-1, 3/16 royalty, one mineral owner");
    println!("  Tract 2: 192.00 acres, lease WD-2, 1/4 royalty, minerals split 50/50");
    println!("\n🔄 Expected behavior:");
    println!("  Tract 1: LORI 0.1875 + WI 0.8125 = 1.0");
    println!("  Tract 2: LORI 0.25 + WI 0.75 = 1.0\n");

    match generate_tract_report(&source) {
        Ok(book) => {
            println!("✅ Report '{}' built with sheets:", book.name);
            for name in book.sheet_names() {
                println!("  - {}", name);
            }

            if let Some(recap) = book.sheet("Unit Recap") {
                println!("\n📊 Unit Recap:");
                println!(
                    "  {:<8} {:>12} {:>12} {:>12}",
                    "TRACT", "LORI", "WI", "TOTAL"
                );
                for row in recap.rows.iter().filter(|r| r.kind == RowKind::Data) {
                    println!(
                        "  {:<8} {:>12} {:>12} {:>12}",
                        row.cells[0].render(),
                        row.cells[1].render(),
                        row.cells[4].render(),
                        row.cells[5].render(),
                    );
                }

                println!("\n✅ Verification:");
                for row in recap.rows.iter().filter(|r| r.kind == RowKind::Data) {
                    if let CellValue::Number(total) = row.cells[5].value {
                        println!(
                            "  Tract {} accounts for 100%: {}",
                            row.cells[0].render(),
                            (total - 1.0).abs() < 1e-9
                        );
                    }
                }
            }

            match CsvSink::default().render(&book) {
                Ok(bytes) => {
                    let path = "west_dome_tract.csv";
                    if let Err(e) = std::fs::write(path, bytes) {
                        eprintln!("❌ Could not write {}: {}", path, e);
                    } else {
                        println!("\n💾 Full report written to {}", path);
                    }
                }
                Err(e) => eprintln!("❌ CSV rendering failed: {}", e),
            }
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
        }
    }
}
