//! # DOI Report Builder
//!
//! A library for transforming mineral ownership schedules into tract-based
//! ownership reports and unit-based division of interest (DOI) reports.
//!
//! ## Core Concepts
//!
//! - **Ownership Record**: one owner's interest in one tract, in one of four
//!   categories (MI, NPRI, ORI, WI)
//! - **Tract-Based Report**: per-category sheets organized as tract blocks,
//!   each row showing the NRI derivation for one owner on that tract
//! - **Unit-Based Report**: per-category sheets organized as owner blocks,
//!   each row scaled by the tract's unit allocation factor
//! - **Burden Resolver**: per-tract, per-lease landowner royalty rates that
//!   feed the working-interest derivation
//! - **Conservation**: unit NRI across all categories should sum to 1.0;
//!   deviations are reported, never silently fixed
//!
//! ## Example
//!
//! ```rust,ignore
//! use doi_report_builder::*;
//!
//! let ownership = RowTable::new(
//!     "Combined",
//!     vec!["OWNER".into(), "TYPE".into(), "TRACT".into(), "TRACT NRI".into()],
//!     vec![
//!         vec!["Jones".into(), "MI".into(), 1.0.into(), 0.1875.into()],
//!         vec!["Pioneer Operating".into(), "WI".into(), 1.0.into(), 0.8125.into()],
//!     ],
//! );
//! let mut source = SourceBook::new();
//! source.push(ownership);
//!
//! let book = generate_tract_report(&source).unwrap();
//! let bytes = CsvSink::default().render(&book).unwrap();
//! ```

pub mod burden;
pub mod conservation;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod report;
pub mod schema;
pub mod source;
pub mod tract;
pub mod tract_report;
pub mod unit_report;
pub mod utils;

#[cfg(feature = "xlsx")]
pub mod xlsx;

pub use burden::RoyaltyBurdens;
pub use conservation::{
    allocation_warning, check_unit_total, verify_unit_total, ConservationReport, NRI_TOLERANCE,
};
pub use engine::{tract_layout, unit_layout, unit_nri, CategoryLayout};
pub use error::{DoiError, Result};
pub use ingestion::*;
pub use report::*;
pub use schema::*;
pub use source::*;
pub use tract::{compare_tracts, sort_tracts};
pub use tract_report::{build_tract_report, TRACT_REPORT_NAME};
pub use unit_report::{build_unit_report, UnitReportOutcome, UNIT_REPORT_NAME};
pub use utils::*;

use log::{debug, info};

pub struct DoiProcessor;

impl DoiProcessor {
    /// Loads ownership data from `source` and builds the tract-based report.
    pub fn tract_report(source: &SourceBook) -> Result<ReportBook> {
        let dataset = load_ownership_data(source)?;
        info!(
            "Generating tract-based report: {} records across {} tracts",
            dataset.len(),
            dataset.unique_tracts().len()
        );
        Ok(build_tract_report(&dataset))
    }

    /// Loads ownership data and the tract allocation table from `source` and
    /// builds the unit-based report. The conservation outcome rides along;
    /// a deviation never fails the build.
    pub fn unit_report(source: &SourceBook) -> Result<UnitReportOutcome> {
        let dataset = load_ownership_data(source)?;
        let allocations = load_tract_allocations(source)?;
        info!(
            "Generating unit-based report: {} records, {} unit tracts",
            dataset.len(),
            allocations.len()
        );

        let outcome = build_unit_report(&dataset, &allocations);
        for warning in &outcome.conservation.warnings {
            debug!("Conservation detail: {}", warning);
        }
        Ok(outcome)
    }

    /// Like [`DoiProcessor::unit_report`], but a conservation violation is an
    /// error instead of a warning.
    pub fn unit_report_verified(source: &SourceBook) -> Result<UnitReportOutcome> {
        let outcome = Self::unit_report(source)?;
        verify_unit_total(outcome.conservation.total_unit_nri)?;
        Ok(outcome)
    }
}

pub fn generate_tract_report(source: &SourceBook) -> Result<ReportBook> {
    DoiProcessor::tract_report(source)
}

pub fn generate_unit_report(source: &SourceBook) -> Result<UnitReportOutcome> {
    DoiProcessor::unit_report(source)
}

pub fn generate_unit_report_verified(source: &SourceBook) -> Result<UnitReportOutcome> {
    DoiProcessor::unit_report_verified(source)
}
