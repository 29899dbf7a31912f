//! Unit NRI conservation checks.
//!
//! A unit's interests, scaled by tract allocations, must account for exactly
//! 100% of production revenue: the sum of unit NRI across every category and
//! owner equals 1.0. Deviations are a data-quality signal (incomplete
//! ownership rows, stale allocation factors), so the default check reports
//! rather than fails; a strict variant exists for callers that want the
//! violation as an error.

use crate::error::{DoiError, Result};
use crate::schema::AllocationTable;
use log::warn;
use serde::{Deserialize, Serialize};

/// Allowed deviation of the unit NRI total from 1.0.
pub const NRI_TOLERANCE: f64 = 1e-4;

/// Outcome of the conservation check on a unit report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConservationReport {
    /// Sum of unit NRI across all categories and owners.
    pub total_unit_nri: f64,

    /// Absolute deviation from 1.0.
    pub deviation: f64,

    pub within_tolerance: bool,

    pub tolerance: f64,

    /// Human-readable findings, empty when the unit balances.
    pub warnings: Vec<String>,
}

impl ConservationReport {
    pub fn is_conserved(&self) -> bool {
        self.within_tolerance
    }
}

/// Checks the unit NRI total against 1.0. Never fails; a violation is
/// logged and carried in the returned report's warnings.
pub fn check_unit_total(total: f64) -> ConservationReport {
    let deviation = (total - 1.0).abs();
    let within_tolerance = deviation < NRI_TOLERANCE;
    let mut warnings = Vec::new();

    if !within_tolerance {
        let message = format!(
            "Unit NRI total {:.8} deviates from 1.0 by {:.8} (tolerance {})",
            total, deviation, NRI_TOLERANCE
        );
        warn!("{message}");
        warnings.push(message);
    }

    ConservationReport {
        total_unit_nri: total,
        deviation,
        within_tolerance,
        tolerance: NRI_TOLERANCE,
        warnings,
    }
}

/// Strict form of [`check_unit_total`]: a violation becomes an error.
pub fn verify_unit_total(total: f64) -> Result<()> {
    let report = check_unit_total(total);
    if report.within_tolerance {
        Ok(())
    } else {
        Err(DoiError::ConservationViolation {
            total,
            deviation: report.deviation,
            tolerance: NRI_TOLERANCE,
        })
    }
}

/// Sanity check on the allocation table itself: factors across the unit
/// should sum to 1.0. Returns a warning message when they do not.
pub fn allocation_warning(allocations: &AllocationTable) -> Option<String> {
    let total = allocations.total_allocation();
    if (total - 1.0).abs() < NRI_TOLERANCE {
        None
    } else {
        let message = format!(
            "Tract allocation factors sum to {:.8}, expected 1.0",
            total
        );
        warn!("{message}");
        Some(message)
    }
}
