use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoiError {
    #[error("Ownership data is missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("Unit schedule format error: {0}")]
    ScheduleFormat(String),

    #[error("No ownership records loaded from source: {0}")]
    EmptyDataset(String),

    #[error("Unknown interest type code: {0}")]
    UnknownInterestType(String),

    #[error("Unit NRI conservation violation: total {total} deviates from 1.0 by {deviation} (tolerance {tolerance})")]
    ConservationViolation {
        total: f64,
        deviation: f64,
        tolerance: f64,
    },

    #[error("Report rendering error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
}

pub type Result<T> = std::result::Result<T, DoiError>;
