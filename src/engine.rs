//! Per-category formula table and column layouts.
//!
//! The four interest categories share one row-construction path: a category's
//! derivation chain (the `value x rate = result` walk shown on its sheet)
//! comes from a single formula table, and the tract-based and unit-based
//! report builders wrap it with their own leading and trailing columns.
//! Layouts say where NRI and acreage precision applies, so the builders never
//! hard-code column positions.

use crate::burden::RoyaltyBurdens;
use crate::report::{Cell, CellValue, NumberFormat};
use crate::schema::{InterestType, OwnershipRecord};

/// Column layout for one category sheet.
#[derive(Debug, Clone, Copy)]
pub struct CategoryLayout {
    pub headers: &'static [&'static str],

    /// Columns displayed at NRI precision (8 decimals).
    pub nri_columns: &'static [usize],

    /// Column displayed at net-acre precision (6 decimals), if the layout
    /// carries acreage.
    pub acres_column: Option<usize>,

    /// Column receiving the NRI sum on totals rows.
    pub total_column: usize,

    /// Column receiving the MI control total (sum of decimal interests),
    /// tract-based MI sheets only.
    pub control_column: Option<usize>,
}

impl CategoryLayout {
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Stamps precision hints onto a row's numeric cells.
    pub fn apply_formats(&self, cells: &mut [Cell]) {
        for &col in self.nri_columns {
            if let Some(cell) = cells.get_mut(col) {
                if matches!(cell.value, CellValue::Number(_)) {
                    cell.format = NumberFormat::Nri;
                }
            }
        }
        if let Some(col) = self.acres_column {
            if let Some(cell) = cells.get_mut(col) {
                if matches!(cell.value, CellValue::Number(_)) {
                    cell.format = NumberFormat::NetAcres;
                }
            }
        }
    }
}

/// Layout for a tract-based category sheet (rows grouped by tract, owner in
/// the first column).
pub fn tract_layout(interest_type: InterestType) -> CategoryLayout {
    match interest_type {
        InterestType::Mi => CategoryLayout {
            headers: &[
                "OWNER", "TRACT", "LEASE NO.", "REQ", "", "MI", "x", "LORI", "-", "NPRI", "=",
                "TRACT NRI", "", "NET ACRES", "", "BURDENED WI OWNER(S)",
            ],
            nri_columns: &[5, 7, 9, 11],
            acres_column: Some(13),
            total_column: 11,
            control_column: Some(5),
        },
        InterestType::Npri => CategoryLayout {
            headers: &[
                "OWNER", "TRACT", "LEASE NO.", "REQ", "", "NPRI", "x", "INTEREST BURDENED", "x",
                "SHARE OF NPRI", "=", "TRACT NRI", "", "BURDENED MI OWNER",
            ],
            nri_columns: &[5, 7, 9, 11],
            acres_column: None,
            total_column: 11,
            control_column: None,
        },
        InterestType::Ori => CategoryLayout {
            headers: &[
                "OWNER", "TRACT", "LEASE NO.", "REQ", "", "ORI", "x", "SHARE OF ORI", "x",
                "INTEREST BURDENED", "=", "TRACT NRI", "", "ACRES BURDENED", "",
                "BURDENED WI OWNER(S)",
            ],
            nri_columns: &[5, 7, 9, 11],
            acres_column: Some(13),
            total_column: 11,
            control_column: None,
        },
        InterestType::Wi => CategoryLayout {
            headers: &[
                "OWNER", "TRACT", "LEASE NO.", "REQ", "", "WI", "", "NET ACRES", "", "1", "-",
                "LORI", "-", "ORI BURDENS", "x", "WI (TRACT)", "=", "TRACT NRI",
            ],
            nri_columns: &[5, 11, 13, 15, 17],
            acres_column: Some(7),
            total_column: 17,
            control_column: None,
        },
    }
}

/// Layout for a unit-based category sheet (rows grouped by owner, trailing
/// UNIT NRI column).
pub fn unit_layout(interest_type: InterestType) -> CategoryLayout {
    match interest_type {
        InterestType::Mi => CategoryLayout {
            headers: &[
                "TRACT", "LEASE NO.", "REQ", "", "MI", "x", "LORI", "-", "NPRI", "=", "TRACT NRI",
                "", "NET ACRES", "", "UNIT NRI",
            ],
            nri_columns: &[4, 6, 8, 10, 14],
            acres_column: Some(12),
            total_column: 14,
            control_column: None,
        },
        InterestType::Npri => CategoryLayout {
            headers: &[
                "TRACT", "LEASE NO.", "REQ", "", "NPRI", "x", "INTEREST BURDENED", "x",
                "SHARE OF NPRI", "=", "TRACT NRI", "", "UNIT NRI",
            ],
            nri_columns: &[4, 6, 8, 10, 12],
            acres_column: None,
            total_column: 12,
            control_column: None,
        },
        InterestType::Ori => CategoryLayout {
            headers: &[
                "TRACT", "LEASE NO.", "REQ", "", "ORI", "x", "SHARE OF ORI", "x",
                "INTEREST BURDENED", "=", "TRACT NRI", "", "ACRES BURDENED", "", "UNIT NRI",
            ],
            nri_columns: &[4, 6, 8, 10, 14],
            acres_column: Some(12),
            total_column: 14,
            control_column: None,
        },
        InterestType::Wi => CategoryLayout {
            headers: &[
                "TRACT", "LEASE NO.", "REQ", "", "WI", "", "NET ACRES", "", "1", "-", "LORI", "-",
                "ORI BURDENS", "x", "WI (TRACT)", "=", "TRACT NRI", "", "UNIT NRI",
            ],
            nri_columns: &[4, 10, 12, 14, 16, 18],
            acres_column: Some(6),
            total_column: 18,
            control_column: None,
        },
    }
}

/// Unit net revenue interest: the tract-level NRI scaled by the tract's
/// allocation factor.
pub fn unit_nri(record: &OwnershipRecord, allocation: f64) -> f64 {
    record.tract_nri * allocation
}

// The derivation chain for one record, from the leading gap column through
// the TRACT NRI result. This is the formula table both report shapes share.
fn formula_chain(record: &OwnershipRecord, burdens: &RoyaltyBurdens) -> Vec<Cell> {
    let general = NumberFormat::General;
    match record.interest_type {
        InterestType::Mi => vec![
            Cell::blank(),
            Cell::number(record.decimal_interest, general),
            Cell::text("x"),
            Cell::number(record.lease_royalty, general),
            Cell::text("-"),
            Cell::number(record.npri_burdens, general),
            Cell::text("="),
            Cell::number(record.tract_nri, general),
        ],
        InterestType::Npri => vec![
            Cell::blank(),
            Cell::number(record.npri_value(), general),
            Cell::text("x"),
            Cell::number(record.interest_burdened, general),
            Cell::text("x"),
            Cell::number(record.share_of_npri, general),
            Cell::text("="),
            Cell::number(record.tract_nri, general),
        ],
        InterestType::Ori => vec![
            Cell::blank(),
            Cell::number(record.ori_value(), general),
            Cell::text("x"),
            Cell::number(record.share_of_ori, general),
            Cell::text("x"),
            Cell::number(record.interest_burdened, general),
            Cell::text("="),
            Cell::number(record.tract_nri, general),
        ],
        InterestType::Wi => {
            let lori = burdens.resolve(&record.tract, &record.lease_no);
            vec![
                Cell::blank(),
                Cell::number(record.decimal_interest, general),
                Cell::blank(),
                Cell::number(record.net_acres, general),
                Cell::blank(),
                Cell::number(1.0, general),
                Cell::text("-"),
                Cell::number(lori, general),
                Cell::text("-"),
                Cell::number(record.ori_burdens, general),
                Cell::text("x"),
                Cell::number(record.wi_tract_value(), general),
                Cell::text("="),
                Cell::number(record.tract_nri, general),
            ]
        }
    }
}

/// A data row for a tract-based category sheet, formats applied.
pub fn tract_data_row(record: &OwnershipRecord, burdens: &RoyaltyBurdens) -> Vec<Cell> {
    let mut cells = vec![
        Cell::text(record.owner.clone()),
        Cell::text(record.tract.clone()),
        Cell::text(record.lease_no.clone()),
        Cell::text(record.requirement.clone()),
    ];
    cells.extend(formula_chain(record, burdens));
    match record.interest_type {
        InterestType::Mi => {
            cells.push(Cell::blank());
            cells.push(Cell::number(record.net_acres, NumberFormat::General));
            cells.push(Cell::blank());
            cells.push(Cell::text(record.burdened_owners.clone()));
        }
        InterestType::Npri => {
            cells.push(Cell::blank());
            cells.push(Cell::text(record.burdened_owners.clone()));
        }
        InterestType::Ori => {
            cells.push(Cell::blank());
            cells.push(Cell::number(record.acres_burdened, NumberFormat::General));
            cells.push(Cell::blank());
            cells.push(Cell::text(record.burdened_owners.clone()));
        }
        InterestType::Wi => {}
    }
    tract_layout(record.interest_type).apply_formats(&mut cells);
    cells
}

/// A data row for a unit-based category sheet, formats applied. Returns the
/// row together with its unit NRI.
pub fn unit_data_row(
    record: &OwnershipRecord,
    burdens: &RoyaltyBurdens,
    allocation: f64,
) -> (Vec<Cell>, f64) {
    let unit_value = unit_nri(record, allocation);
    let mut cells = vec![
        Cell::text(record.tract.clone()),
        Cell::text(record.lease_no.clone()),
        Cell::text(record.requirement.clone()),
    ];
    cells.extend(formula_chain(record, burdens));
    match record.interest_type {
        InterestType::Mi => {
            cells.push(Cell::blank());
            cells.push(Cell::number(record.net_acres, NumberFormat::General));
        }
        InterestType::Ori => {
            cells.push(Cell::blank());
            cells.push(Cell::number(record.acres_burdened, NumberFormat::General));
        }
        InterestType::Npri | InterestType::Wi => {}
    }
    cells.push(Cell::blank());
    cells.push(Cell::number(unit_value, NumberFormat::General));

    unit_layout(record.interest_type).apply_formats(&mut cells);
    (cells, unit_value)
}

/// Totals row for one tract block: "TOTALS", the NRI sum in the layout's
/// total column, and for MI the control total of decimal interests.
pub fn tract_totals_row(
    layout: &CategoryLayout,
    nri_total: f64,
    control_total: Option<f64>,
) -> Vec<Cell> {
    let mut cells = vec![Cell::blank(); layout.width()];
    cells[0] = Cell::text("TOTALS");
    if let (Some(col), Some(total)) = (layout.control_column, control_total) {
        cells[col] = Cell::nri(total);
    }
    cells[layout.total_column] = Cell::nri(nri_total);
    cells
}

/// Totals row for one owner block: "TOTAL" and the owner's unit NRI sum in
/// the trailing column.
pub fn owner_totals_row(layout: &CategoryLayout, unit_total: f64) -> Vec<Cell> {
    let mut cells = vec![Cell::blank(); layout.width()];
    cells[0] = Cell::text("TOTAL");
    cells[layout.total_column] = Cell::nri(unit_total);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OwnershipDataset;

    fn wi_record() -> OwnershipRecord {
        OwnershipRecord {
            owner: "Pioneer Operating".to_string(),
            interest_type: InterestType::Wi,
            tract: "1".to_string(),
            lease_no: "L-1".to_string(),
            decimal_interest: 1.0,
            ori_burdens: 0.02,
            wi_tract: Some(0.5),
            tract_nri: 0.39625,
            net_acres: 320.0,
            ..OwnershipRecord::default()
        }
    }

    fn burdens_with_rate(tract: &str, lease: &str, rate: f64) -> RoyaltyBurdens {
        RoyaltyBurdens::from_dataset(&OwnershipDataset::new(vec![OwnershipRecord {
            owner: "Jones".to_string(),
            interest_type: InterestType::Mi,
            tract: tract.to_string(),
            lease_no: lease.to_string(),
            lease_royalty: rate,
            ..OwnershipRecord::default()
        }]))
    }

    #[test]
    fn test_rows_match_layout_width() {
        let burdens = RoyaltyBurdens::from_dataset(&OwnershipDataset::new(vec![]));
        for interest_type in InterestType::ALL {
            let record = OwnershipRecord {
                interest_type,
                ..OwnershipRecord::default()
            };
            let tract_row = tract_data_row(&record, &burdens);
            assert_eq!(
                tract_row.len(),
                tract_layout(interest_type).width(),
                "tract row width for {:?}",
                interest_type
            );
            let (unit_row, _) = unit_data_row(&record, &burdens, 0.5);
            assert_eq!(
                unit_row.len(),
                unit_layout(interest_type).width(),
                "unit row width for {:?}",
                interest_type
            );
        }
    }

    #[test]
    fn test_layout_columns_are_in_bounds_and_labeled() {
        for interest_type in InterestType::ALL {
            let tract = tract_layout(interest_type);
            let unit = unit_layout(interest_type);
            for &col in tract.nri_columns {
                assert!(col < tract.width());
            }
            for &col in unit.nri_columns {
                assert!(col < unit.width());
            }
            assert_eq!(tract.headers[tract.total_column], "TRACT NRI");
            assert_eq!(unit.headers[unit.total_column], "UNIT NRI");
            if let Some(col) = tract.acres_column {
                assert!(tract.headers[col].contains("ACRES"));
            }
            if let Some(col) = unit.acres_column {
                assert!(unit.headers[col].contains("ACRES"));
            }
        }
    }

    #[test]
    fn test_mi_row_chain() {
        let record = OwnershipRecord {
            owner: "Jones".to_string(),
            interest_type: InterestType::Mi,
            tract: "1".to_string(),
            decimal_interest: 0.5,
            lease_royalty: 0.1875,
            npri_burdens: 0.01,
            tract_nri: 0.08375,
            net_acres: 160.0,
            ..OwnershipRecord::default()
        };
        let burdens = RoyaltyBurdens::from_dataset(&OwnershipDataset::new(vec![]));
        let cells = tract_data_row(&record, &burdens);

        assert_eq!(cells[0], Cell::text("Jones"));
        assert_eq!(cells[5].value, CellValue::Number(0.5));
        assert_eq!(cells[5].format, NumberFormat::Nri);
        assert_eq!(cells[6], Cell::text("x"));
        assert_eq!(cells[7].value, CellValue::Number(0.1875));
        assert_eq!(cells[9].value, CellValue::Number(0.01));
        assert_eq!(cells[11].value, CellValue::Number(0.08375));
        assert_eq!(cells[13].value, CellValue::Number(160.0));
        assert_eq!(cells[13].format, NumberFormat::NetAcres);
        assert_eq!(cells[15], Cell::text(""));
    }

    #[test]
    fn test_wi_row_resolves_royalty_burden() {
        let burdens = burdens_with_rate("1", "L-1", 0.1875);
        let cells = tract_data_row(&wi_record(), &burdens);
        let layout = tract_layout(InterestType::Wi);

        // LORI column carries the resolved rate.
        assert_eq!(cells[11].value, CellValue::Number(0.1875));
        // Literal 1 heads the net-revenue subtraction.
        assert_eq!(cells[9].value, CellValue::Number(1.0));
        assert_eq!(cells[15].value, CellValue::Number(0.5));
        assert_eq!(cells[layout.total_column].value, CellValue::Number(0.39625));
    }

    #[test]
    fn test_wi_row_falls_back_to_default_rate() {
        let burdens = burdens_with_rate("1", "L-other", 0.25);
        let mut record = wi_record();
        record.lease_no = "unmatched".to_string();
        let cells = tract_data_row(&record, &burdens);
        assert_eq!(cells[11].value, CellValue::Number(0.25));
    }

    #[test]
    fn test_unit_row_carries_unit_nri() {
        let burdens = burdens_with_rate("1", "L-1", 0.1875);
        let (cells, unit_value) = unit_data_row(&wi_record(), &burdens, 0.6);
        let layout = unit_layout(InterestType::Wi);

        assert!((unit_value - 0.39625 * 0.6).abs() < 1e-12);
        assert_eq!(cells[0], Cell::text("1"));
        assert_eq!(
            cells[layout.total_column].value,
            CellValue::Number(unit_value)
        );
        assert_eq!(cells[layout.total_column].format, NumberFormat::Nri);
    }

    #[test]
    fn test_npri_fallback_value_flows_into_chain() {
        let record = OwnershipRecord {
            owner: "Carter".to_string(),
            interest_type: InterestType::Npri,
            tract: "2".to_string(),
            decimal_interest: 0.03125,
            npri_interest: None,
            interest_burdened: 0.5,
            share_of_npri: 0.25,
            tract_nri: 0.00390625,
            ..OwnershipRecord::default()
        };
        let burdens = RoyaltyBurdens::from_dataset(&OwnershipDataset::new(vec![]));
        let cells = tract_data_row(&record, &burdens);
        assert_eq!(cells[5].value, CellValue::Number(0.03125));
        assert_eq!(cells[5].format, NumberFormat::Nri);
    }

    #[test]
    fn test_totals_rows() {
        let mi = tract_layout(InterestType::Mi);
        let cells = tract_totals_row(&mi, 0.75, Some(1.0));
        assert_eq!(cells[0], Cell::text("TOTALS"));
        assert_eq!(cells[5].value, CellValue::Number(1.0));
        assert_eq!(cells[11].value, CellValue::Number(0.75));

        let wi = tract_layout(InterestType::Wi);
        let cells = tract_totals_row(&wi, 0.5, None);
        assert_eq!(cells[17].value, CellValue::Number(0.5));
        assert_eq!(cells[5].value, CellValue::Blank);

        let unit = unit_layout(InterestType::Npri);
        let cells = owner_totals_row(&unit, 0.125);
        assert_eq!(cells[0], Cell::text("TOTAL"));
        assert_eq!(cells[12].value, CellValue::Number(0.125));
    }
}
