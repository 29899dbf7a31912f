use doi_report_builder::{
    generate_tract_report, generate_unit_report, xlsx, RowTable, Scalar, SourceBook,
};
use std::path::Path;

fn t(s: &str) -> Scalar {
    Scalar::from(s)
}

fn n(v: f64) -> Scalar {
    Scalar::from(v)
}

// Run with: cargo run --example xlsx_reports --features xlsx
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
        vec![
            t("Hargrove Trust"),
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

    let tract_book = generate_tract_report(&source)?;
    let outcome = generate_unit_report(&source)?;

    let dir = Path::new(".");
    let tract_path = xlsx::save_report(&tract_book, dir)?;
    let unit_path = xlsx::save_report(&outcome.book, dir)?;

    println!("Wrote {}", tract_path.display());
    println!("Wrote {}", unit_path.display());
    println!(
        "Unit NRI total: {:.8} (conserved: {})",
        outcome.conservation.total_unit_nri,
        outcome.conservation.is_conserved()
    );
    Ok(())
}
