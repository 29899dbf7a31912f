//! Unit-based division-of-interest report.
//!
//! The dataset is first restricted to tracts participating in the unit, then
//! each interest category becomes a sheet of owner blocks whose rows carry
//! the tract-level derivation plus a trailing `UNIT NRI` column
//! (`tract_nri * allocation`). The recap scales per-tract category sums by
//! the tract's allocation factor, and its grand total is checked against the
//! conservation invariant.

use crate::burden::RoyaltyBurdens;
use crate::conservation::{allocation_warning, check_unit_total, ConservationReport};
use crate::engine::{owner_totals_row, unit_data_row, unit_layout};
use crate::report::{Cell, NumberFormat, ReportBook, RowKind, Sheet, SheetBuilder};
use crate::schema::{AllocationTable, InterestType, OwnershipDataset, OwnershipRecord};
use crate::tract::compare_tracts;
use log::{debug, info};

pub const UNIT_REPORT_NAME: &str = "Unit_Based_DOI";

/// A finished unit report plus the outcome of its conservation check.
///
/// A failed check never suppresses the report; callers decide whether the
/// deviation is actionable.
#[derive(Debug, Clone)]
pub struct UnitReportOutcome {
    pub book: ReportBook,
    pub conservation: ConservationReport,
}

/// Builds the unit-based DOI report for a dataset and its allocation table.
pub fn build_unit_report(
    dataset: &OwnershipDataset,
    allocations: &AllocationTable,
) -> UnitReportOutcome {
    let restricted = dataset.restricted_to(allocations);
    let burdens = RoyaltyBurdens::from_dataset(&restricted);

    let mut book = ReportBook::new(UNIT_REPORT_NAME);
    book.push_sheet(allocation_list_sheet(allocations));

    for interest_type in InterestType::ALL {
        match category_sheet(&restricted, interest_type, &burdens, allocations) {
            Some(sheet) => book.push_sheet(sheet),
            None => debug!(
                "Skipping {} sheet: no {} records on unit tracts",
                interest_type.sheet_name(),
                interest_type.code()
            ),
        }
    }

    let (recap, grand_total) = recap_sheet(&restricted, allocations);
    book.push_sheet(recap);

    let mut conservation = check_unit_total(grand_total);
    if let Some(warning) = allocation_warning(allocations) {
        conservation.warnings.insert(0, warning);
    }

    info!(
        "Built unit-based report: {} sheets over {} unit tracts, unit NRI total {:.8}",
        book.sheets.len(),
        allocations.len(),
        grand_total
    );
    UnitReportOutcome { book, conservation }
}

fn allocation_list_sheet(allocations: &AllocationTable) -> Sheet {
    let mut builder = SheetBuilder::new("Tract List").column_headers(&[
        "TRACT",
        "LEGAL DESCRIPTION",
        "ACRES",
        "TRACT ALLOCATION",
    ]);
    for entry in &allocations.entries {
        builder = builder.row(
            RowKind::Data,
            vec![
                Cell::text(entry.tract.clone()),
                Cell::text(entry.legal_description.clone()),
                Cell::number(entry.acres, NumberFormat::GrossAcres),
                Cell::nri(entry.allocation),
            ],
        );
    }
    builder.finish()
}

fn category_sheet(
    restricted: &OwnershipDataset,
    interest_type: InterestType,
    burdens: &RoyaltyBurdens,
    allocations: &AllocationTable,
) -> Option<Sheet> {
    let records = restricted.category_records(interest_type);
    if records.is_empty() {
        return None;
    }

    let layout = unit_layout(interest_type);
    let mut builder = SheetBuilder::new(interest_type.sheet_name()).column_headers(layout.headers);

    let mut owners: Vec<String> = Vec::new();
    for record in &records {
        if !owners.contains(&record.owner) {
            owners.push(record.owner.clone());
        }
    }
    owners.sort();

    for owner in owners {
        let mut block: Vec<&OwnershipRecord> = records
            .iter()
            .filter(|r| r.owner == owner)
            .copied()
            .collect();
        block.sort_by(|a, b| compare_tracts(&a.tract, &b.tract));

        builder = builder
            .blank_row()
            .label_row("Owner Name:", Cell::text(owner))
            .blank_row();

        let mut owner_total = 0.0;
        for record in &block {
            let allocation = allocations.allocation_for(&record.tract);
            let (cells, unit_value) = unit_data_row(record, burdens, allocation);
            owner_total += unit_value;
            builder = builder.row(RowKind::Data, cells);
        }

        builder = builder.row(RowKind::Totals, owner_totals_row(&layout, owner_total));
    }

    Some(builder.finish())
}

/// Allocation-weighted category sum for one unit tract, placeholder owners
/// excluded.
fn category_unit_sum(
    restricted: &OwnershipDataset,
    interest_type: InterestType,
    tract: &str,
    allocation: f64,
) -> f64 {
    restricted
        .category_records(interest_type)
        .iter()
        .filter(|r| r.tract == tract)
        .map(|r| r.tract_nri * allocation)
        .sum()
}

fn recap_sheet(restricted: &OwnershipDataset, allocations: &AllocationTable) -> (Sheet, f64) {
    let mut builder = SheetBuilder::new("Unit Recap").column_headers(&[
        "TRACT",
        "LORI NRI",
        "NPRI NRI",
        "ORI NRI",
        "WI NRI",
        "TOTAL NRI",
    ]);

    let mut totals = [0.0f64; 4];
    for tract in allocations.sorted_tracts() {
        let allocation = allocations.allocation_for(&tract);
        let mut cells = vec![Cell::text(tract.clone())];
        let mut tract_total = 0.0;
        for (i, interest_type) in InterestType::ALL.iter().enumerate() {
            let value = category_unit_sum(restricted, *interest_type, &tract, allocation);
            totals[i] += value;
            tract_total += value;
            cells.push(Cell::nri(value));
        }
        cells.push(Cell::nri(tract_total));
        builder = builder.row(RowKind::Data, cells);
    }

    let grand_total: f64 = totals.iter().sum();
    let mut cells = vec![Cell::text("UNIT NRI TOTAL")];
    cells.extend(totals.iter().map(|t| Cell::nri(*t)));
    cells.push(Cell::nri(grand_total));
    (builder.row(RowKind::Totals, cells).finish(), grand_total)
}
