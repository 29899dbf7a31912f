//! Tract-based ownership report.
//!
//! One sheet per interest category, each organized as repeated tract blocks:
//! an info block (tract number, gross acres, legal description), the tract's
//! data rows ordered by owner, and a totals row. A Tract List sheet leads and
//! a Unit Recap sheet closes the book.

use crate::burden::RoyaltyBurdens;
use crate::engine::{tract_data_row, tract_layout, tract_totals_row};
use crate::report::{Cell, NumberFormat, ReportBook, RowKind, Sheet, SheetBuilder};
use crate::schema::{InterestType, OwnershipDataset, OwnershipRecord, TractInfo};
use crate::tract::compare_tracts;
use log::{debug, info};
use std::collections::BTreeMap;

pub const TRACT_REPORT_NAME: &str = "Tract_Based_Ownership";

/// Builds the tract-based ownership report for a loaded dataset.
pub fn build_tract_report(dataset: &OwnershipDataset) -> ReportBook {
    let info = dataset.tract_info();
    let burdens = RoyaltyBurdens::from_dataset(dataset);

    let mut book = ReportBook::new(TRACT_REPORT_NAME);
    book.push_sheet(tract_list_sheet(dataset, &info));

    for interest_type in InterestType::ALL {
        match category_sheet(dataset, interest_type, &burdens, &info) {
            Some(sheet) => book.push_sheet(sheet),
            None => debug!(
                "Skipping {} sheet: no {} records",
                interest_type.sheet_name(),
                interest_type.code()
            ),
        }
    }

    book.push_sheet(recap_sheet(dataset));
    info!(
        "Built tract-based report: {} sheets over {} tracts",
        book.sheets.len(),
        dataset.unique_tracts().len()
    );
    book
}

fn tract_list_sheet(dataset: &OwnershipDataset, info: &BTreeMap<String, TractInfo>) -> Sheet {
    let mut builder =
        SheetBuilder::new("Tract List").column_headers(&["TRACT", "LEGAL DESCRIPTION", "GROSS ACRES"]);
    for tract in dataset.sorted_tracts() {
        let tract_info = info.get(&tract).cloned().unwrap_or_default();
        builder = builder.row(
            RowKind::Data,
            vec![
                Cell::text(tract),
                Cell::text(tract_info.legal_description),
                Cell::number(tract_info.gross_acres, NumberFormat::GrossAcres),
            ],
        );
    }
    builder.finish()
}

fn category_sheet(
    dataset: &OwnershipDataset,
    interest_type: InterestType,
    burdens: &RoyaltyBurdens,
    info: &BTreeMap<String, TractInfo>,
) -> Option<Sheet> {
    let records = dataset.category_records(interest_type);
    if records.is_empty() {
        return None;
    }

    let layout = tract_layout(interest_type);
    let mut builder = SheetBuilder::new(interest_type.sheet_name()).column_headers(layout.headers);

    let mut tracts: Vec<String> = Vec::new();
    for record in &records {
        if !tracts.contains(&record.tract) {
            tracts.push(record.tract.clone());
        }
    }
    tracts.sort_by(|a, b| compare_tracts(a, b));

    for tract in tracts {
        let mut block: Vec<&OwnershipRecord> = records
            .iter()
            .filter(|r| r.tract == tract)
            .copied()
            .collect();
        block.sort_by(|a, b| a.owner.cmp(&b.owner));

        let tract_info = info.get(&tract).cloned().unwrap_or_default();
        builder = builder
            .blank_row()
            .label_row("Tract No.:", Cell::text(tract.clone()))
            .label_row(
                "Gross Acres:",
                Cell::number(tract_info.gross_acres, NumberFormat::GrossAcres),
            )
            .label_row("Legal Description:", Cell::text(tract_info.legal_description))
            .blank_row();

        let mut nri_total = 0.0;
        let mut control_total = 0.0;
        for record in &block {
            nri_total += record.tract_nri;
            control_total += record.decimal_interest;
            builder = builder.row(RowKind::Data, tract_data_row(record, burdens));
        }

        let control = if interest_type == InterestType::Mi {
            Some(control_total)
        } else {
            None
        };
        builder = builder.row(RowKind::Totals, tract_totals_row(&layout, nri_total, control));
    }

    Some(builder.finish())
}

/// Sum of tract-level NRI for one category on one tract, placeholder owners
/// excluded.
fn category_tract_sum(dataset: &OwnershipDataset, interest_type: InterestType, tract: &str) -> f64 {
    dataset
        .category_records(interest_type)
        .iter()
        .filter(|r| r.tract == tract)
        .map(|r| r.tract_nri)
        .sum()
}

fn recap_sheet(dataset: &OwnershipDataset) -> Sheet {
    let mut builder = SheetBuilder::new("Unit Recap").column_headers(&[
        "TRACT",
        "LORI NRI",
        "NPRI NRI",
        "ORI NRI",
        "WI NRI",
        "TOTAL NRI",
    ]);

    let mut totals = [0.0f64; 4];
    for tract in dataset.sorted_tracts() {
        let mut cells = vec![Cell::text(tract.clone())];
        let mut tract_total = 0.0;
        for (i, interest_type) in InterestType::ALL.iter().enumerate() {
            let value = category_tract_sum(dataset, *interest_type, &tract);
            totals[i] += value;
            tract_total += value;
            cells.push(Cell::nri(value));
        }
        cells.push(Cell::nri(tract_total));
        builder = builder.row(RowKind::Data, cells);
    }

    let grand_total: f64 = totals.iter().sum();
    let mut cells = vec![Cell::text("TOTAL")];
    cells.extend(totals.iter().map(|t| Cell::nri(*t)));
    cells.push(Cell::nri(grand_total));
    builder.row(RowKind::Totals, cells).finish()
}
