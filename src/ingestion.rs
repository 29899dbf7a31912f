use crate::error::{DoiError, Result};
use crate::schema::{
    AllocationTable, InterestType, LoadStats, OwnershipDataset, OwnershipRecord, TractAllocation,
};
use crate::source::{RowTable, Scalar, SourceBook};
use crate::utils::{clean_label, normalize_tract, to_float};
use log::{debug, info, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["OWNER", "TYPE", "TRACT"];

/// Loads ownership records from a combined data source.
///
/// Sheet selection tries, in order: a sheet named "Combined", the first sheet
/// carrying OWNER and TYPE columns, and finally a scan of the first sheet for
/// a header row (sources exported with title rows above the header land
/// here). Rows with an empty tract key or an unrecognized TYPE code are
/// dropped and counted in [`LoadStats`].
pub fn load_ownership_data(book: &SourceBook) -> Result<OwnershipDataset> {
    let table = select_ownership_table(book)?;

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DoiError::MissingColumns(missing));
    }

    // Optional columns fall back to other fields only when absent entirely,
    // so resolve their presence once for the whole table.
    let npri_col = table.column_index("NPRI");
    let ori_col = table.column_index("ORI");
    let wi_tract_col = table.column_index("WI (TRACT)");
    let gross_acres_col = table.column_index("Tract Gross Acres");

    let mut stats = LoadStats::default();
    let mut records = Vec::new();

    for i in 0..table.row_count() {
        stats.rows_scanned += 1;

        let tract = normalize_tract(table.get(i, "TRACT"));
        if tract.is_empty() {
            stats.dropped_empty_tract += 1;
            debug!("Dropping row {} of '{}': empty tract", i, table.name);
            continue;
        }

        let type_code = clean_label(table.get(i, "TYPE"));
        let interest_type = match InterestType::from_code(&type_code) {
            Some(t) => t,
            None => {
                stats.dropped_unknown_type += 1;
                debug!(
                    "Dropping row {} of '{}': unrecognized TYPE '{}'",
                    i, table.name, type_code
                );
                continue;
            }
        };

        records.push(OwnershipRecord {
            owner: clean_label(table.get(i, "OWNER")),
            interest_type,
            tract,
            lease_no: clean_label(table.get(i, "LEASE NO.")),
            requirement: clean_label(table.get(i, "REQ")),
            decimal_interest: to_float(table.get(i, "DECIMAL INTEREST"), 0.0),
            lease_royalty: to_float(table.get(i, "LEASE ROYALTY"), 0.0),
            npri_burdens: to_float(table.get(i, "NPRI BURDENS"), 0.0),
            npri_interest: npri_col.map(|c| to_float(table.cell(i, c), 0.0)),
            interest_burdened: to_float(table.get(i, "INTEREST BURDENED"), 0.0),
            share_of_npri: to_float(table.get(i, "SHARE OF NPRI"), 0.0),
            ori_interest: ori_col.map(|c| to_float(table.cell(i, c), 0.0)),
            share_of_ori: to_float(table.get(i, "SHARE OF ORI"), 0.0),
            ori_burdens: to_float(table.get(i, "ORI BURDENS"), 0.0),
            wi_tract: wi_tract_col.map(|c| to_float(table.cell(i, c), 0.0)),
            tract_nri: to_float(table.get(i, "TRACT NRI"), 0.0),
            net_acres: to_float(table.get(i, "NET ACRES"), 0.0),
            acres_burdened: to_float(table.get(i, "ACRES BURDENED"), 0.0),
            burdened_owners: clean_label(table.get(i, "Burdened WI Owners")),
            legal_description: clean_label(table.get(i, "Legal Description")),
            tract_gross_acres: gross_acres_col.map(|c| to_float(table.cell(i, c), 0.0)),
        });
    }

    stats.records_loaded = records.len();
    info!(
        "Loaded {} ownership records from '{}' ({} empty-tract, {} unknown-type rows dropped)",
        stats.records_loaded, table.name, stats.dropped_empty_tract, stats.dropped_unknown_type
    );

    Ok(OwnershipDataset { records, stats })
}

fn select_ownership_table(book: &SourceBook) -> Result<RowTable> {
    if let Some(table) = book.table("Combined") {
        debug!("Using 'Combined' sheet for ownership data");
        return Ok(table.clone());
    }

    if let Some(table) = book
        .tables
        .iter()
        .find(|t| t.has_column("OWNER") && t.has_column("TYPE"))
    {
        debug!("Using sheet '{}' for ownership data", table.name);
        return Ok(table.clone());
    }

    let first = book
        .first()
        .ok_or_else(|| DoiError::EmptyDataset("source contains no sheets".to_string()))?;

    // The header row may sit below title rows. Find a row with an OWNER cell
    // and treat everything below it as data.
    for (i, row) in first.rows.iter().enumerate() {
        let is_header = row
            .iter()
            .any(|cell| clean_label(cell).eq_ignore_ascii_case("OWNER"));
        if is_header {
            warn!(
                "Sheet '{}' has no header row at the top; using row {} as headers",
                first.name, i
            );
            let headers: Vec<String> = row.iter().map(clean_label).collect();
            let rows = first.rows[i + 1..].to_vec();
            return Ok(RowTable::new(first.name.clone(), headers, rows));
        }
    }

    // No better candidate. Column validation on this table reports what is
    // actually missing.
    Ok(first.clone())
}

/// Loads tract allocation factors from a unit schedule source.
///
/// The schedule's "Tract List" sheet holds an allocation region: a marker row
/// whose first cell is "Tract", then one row per tract of (tract, legal
/// description, acres, allocation) until a "Total Unit Acres" row or a blank
/// tract cell.
pub fn load_tract_allocations(book: &SourceBook) -> Result<AllocationTable> {
    let table = book.table("Tract List").ok_or_else(|| {
        DoiError::ScheduleFormat("schedule source has no 'Tract List' sheet".to_string())
    })?;

    let start = find_allocation_region(table).ok_or_else(|| {
        DoiError::ScheduleFormat("could not find tract allocation data in schedule".to_string())
    })?;

    let mut entries = Vec::new();
    for i in start..table.row_count() {
        let tract_cell = table.cell(i, 0);
        if is_missing(tract_cell) {
            break;
        }
        if clean_label(tract_cell).to_uppercase() == "TOTAL UNIT ACRES" {
            break;
        }
        let tract = normalize_tract(tract_cell);
        if tract.is_empty() {
            continue;
        }
        entries.push(TractAllocation {
            tract,
            legal_description: clean_label(table.cell(i, 1)),
            acres: to_float(table.cell(i, 2), 0.0),
            allocation: to_float(table.cell(i, 3), 0.0),
        });
    }

    if entries.is_empty() {
        return Err(DoiError::ScheduleFormat(
            "no tract allocations found in schedule".to_string(),
        ));
    }

    let allocations = AllocationTable::new(entries);
    info!(
        "Loaded {} tract allocations (total allocation {:.8})",
        allocations.len(),
        allocations.total_allocation()
    );
    Ok(allocations)
}

/// Index of the first data row of the allocation region. The marker row may
/// be the sheet's header row or any body row.
fn find_allocation_region(table: &RowTable) -> Option<usize> {
    if let Some(first_header) = table.headers.first() {
        if first_header.trim().eq_ignore_ascii_case("tract") {
            return Some(0);
        }
    }
    for i in 0..table.row_count() {
        if clean_label(table.cell(i, 0)).eq_ignore_ascii_case("tract") {
            return Some(i + 1);
        }
    }
    None
}

fn is_missing(cell: &Scalar) -> bool {
    match cell {
        Scalar::Empty => true,
        Scalar::Number(n) => n.is_nan(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ownership_headers() -> Vec<String> {
        [
            "OWNER",
            "TYPE",
            "TRACT",
            "LEASE NO.",
            "DECIMAL INTEREST",
            "LEASE ROYALTY",
            "TRACT NRI",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn ownership_row(owner: &str, type_code: &str, tract: Scalar) -> Vec<Scalar> {
        vec![
            owner.into(),
            type_code.into(),
            tract,
            "L-1".into(),
            0.5.into(),
            0.1875.into(),
            0.09375.into(),
        ]
    }

    #[test]
    fn test_load_from_combined_sheet() {
        let mut book = SourceBook::new();
        book.push(RowTable::new(
            "Combined",
            ownership_headers(),
            vec![
                ownership_row("Jones", "MI", "1".into()),
                ownership_row("Smith", "WI", Scalar::Number(2.0)),
            ],
        ));

        let dataset = load_ownership_data(&book).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].tract, "1");
        assert_eq!(dataset.records[1].tract, "2");
        assert_eq!(dataset.records[0].interest_type, InterestType::Mi);
        assert_eq!(dataset.records[0].decimal_interest, 0.5);
    }

    #[test]
    fn test_falls_back_to_sheet_with_required_columns() {
        let mut book = SourceBook::new();
        book.push(RowTable::new(
            "Notes",
            vec!["A".to_string()],
            vec![vec!["x".into()]],
        ));
        book.push(RowTable::new(
            "Export 2024",
            ownership_headers(),
            vec![ownership_row("Jones", "MI", "1".into())],
        ));

        let dataset = load_ownership_data(&book).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_header_row_scan() {
        // Title rows above the real header.
        let mut rows = vec![
            vec!["Some Unit - Division Order Title Opinion".into()],
            vec![Scalar::Empty],
        ];
        let header_row: Vec<Scalar> = ownership_headers().iter().map(|h| h.as_str().into()).collect();
        rows.push(header_row);
        rows.push(ownership_row("Jones", "MI", "1".into()));

        let mut book = SourceBook::new();
        book.push(RowTable::new("Sheet1", vec!["".to_string()], rows));

        let dataset = load_ownership_data(&book).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].owner, "Jones");
    }

    #[test]
    fn test_missing_columns_error() {
        let mut book = SourceBook::new();
        book.push(RowTable::new(
            "Combined",
            vec!["OWNER".to_string(), "TYPE".to_string()],
            vec![],
        ));

        let err = load_ownership_data(&book).unwrap_err();
        match err {
            DoiError::MissingColumns(cols) => assert_eq!(cols, vec!["TRACT".to_string()]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_drops_empty_tract_and_unknown_type_rows() {
        let mut book = SourceBook::new();
        book.push(RowTable::new(
            "Combined",
            ownership_headers(),
            vec![
                ownership_row("Jones", "MI", "1".into()),
                ownership_row("Ghost", "MI", Scalar::Empty),
                ownership_row("Odd", "ROYALTY", "1".into()),
            ],
        ));

        let dataset = load_ownership_data(&book).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.stats.rows_scanned, 3);
        assert_eq!(dataset.stats.dropped_empty_tract, 1);
        assert_eq!(dataset.stats.dropped_unknown_type, 1);
    }

    #[test]
    fn test_absent_optional_columns_load_as_none() {
        let mut book = SourceBook::new();
        book.push(RowTable::new(
            "Combined",
            ownership_headers(),
            vec![ownership_row("Jones", "NPRI", "1".into())],
        ));

        let dataset = load_ownership_data(&book).unwrap();
        let record = &dataset.records[0];
        assert_eq!(record.npri_interest, None);
        assert_eq!(record.npri_value(), record.decimal_interest);
    }

    #[test]
    fn test_present_optional_column_wins_over_fallback() {
        let mut headers = ownership_headers();
        headers.push("NPRI".to_string());
        let mut row = ownership_row("Jones", "NPRI", "1".into());
        row.push(0.02.into());

        let mut book = SourceBook::new();
        book.push(RowTable::new("Combined", headers, vec![row]));

        let dataset = load_ownership_data(&book).unwrap();
        assert_eq!(dataset.records[0].npri_interest, Some(0.02));
        assert_eq!(dataset.records[0].npri_value(), 0.02);
    }

    fn schedule_book(rows: Vec<Vec<Scalar>>) -> SourceBook {
        let mut book = SourceBook::new();
        book.push(RowTable::new("Tract List", vec!["".to_string()], rows));
        book
    }

    #[test]
    fn test_load_allocations_with_marker_row() {
        let book = schedule_book(vec![
            vec!["Anderson Unit No. 1".into()],
            vec![
                "Tract".into(),
                "Legal Description".into(),
                "Acres".into(),
                "Tract Allocation".into(),
            ],
            vec!["1".into(), "N/2 Section 12".into(), 320.0.into(), 0.6.into()],
            vec![
                Scalar::Number(2.0),
                "S/2 Section 12".into(),
                213.33.into(),
                0.4.into(),
            ],
            vec!["TOTAL UNIT ACRES".into(), Scalar::Empty, 533.33.into()],
        ]);

        let allocations = load_tract_allocations(&book).unwrap();
        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations.allocation_for("1"), 0.6);
        assert_eq!(allocations.allocation_for("2"), 0.4);
        assert_eq!(allocations.get("2").unwrap().acres, 213.33);
    }

    #[test]
    fn test_allocation_region_stops_at_blank_tract() {
        let book = schedule_book(vec![
            vec!["Tract".into(), "Legal".into(), "Acres".into(), "Allocation".into()],
            vec!["1".into(), "N/2".into(), 320.0.into(), 1.0.into()],
            vec![Scalar::Empty],
            vec!["99".into(), "stray".into(), 1.0.into(), 1.0.into()],
        ]);

        let allocations = load_tract_allocations(&book).unwrap();
        assert_eq!(allocations.len(), 1);
        assert!(!allocations.contains("99"));
    }

    #[test]
    fn test_marker_in_header_row() {
        let mut book = SourceBook::new();
        book.push(RowTable::new(
            "Tract List",
            vec![
                "Tract".to_string(),
                "Legal Description".to_string(),
                "Acres".to_string(),
                "Tract Allocation".to_string(),
            ],
            vec![vec!["1".into(), "All of Section 7".into(), 640.0.into(), 1.0.into()]],
        ));

        let allocations = load_tract_allocations(&book).unwrap();
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations.get("1").unwrap().legal_description, "All of Section 7");
    }

    #[test]
    fn test_missing_marker_is_schedule_format_error() {
        let book = schedule_book(vec![
            vec!["Anderson Unit No. 1".into()],
            vec!["no marker here".into()],
        ]);

        let err = load_tract_allocations(&book).unwrap_err();
        assert!(matches!(err, DoiError::ScheduleFormat(_)));
    }

    #[test]
    fn test_empty_allocation_region_is_schedule_format_error() {
        let book = schedule_book(vec![
            vec!["Tract".into(), "Legal".into(), "Acres".into(), "Allocation".into()],
            vec![Scalar::Empty],
        ]);

        let err = load_tract_allocations(&book).unwrap_err();
        assert!(matches!(err, DoiError::ScheduleFormat(_)));
    }

    #[test]
    fn test_missing_tract_list_sheet() {
        let mut book = SourceBook::new();
        book.push(RowTable::new("Other", vec!["A".to_string()], vec![]));
        let err = load_tract_allocations(&book).unwrap_err();
        assert!(matches!(err, DoiError::ScheduleFormat(_)));
    }
}
