//! Error types for the NFL data loader

use thiserror::Error;


pub type Result<T> = std::result::Result<T, NflDataError>;

#[derive(Error, Debug)]
pub enum NflDataError {
    #[error("Source '{provider}' unavailable at {location}: {reason}")]
    SourceUnavailable {
        provider: String,
        location: String,
        reason: String,
    },

    #[error("Schema '{schema}' rejected field '{field}' (expected {expected}){}: {detail}", fmt_row(.row))]
    SchemaValidation {
        schema: String,
        field: String,
        expected: String,
        row: Option<usize>,
        detail: String,
    },

    #[error("Column '{column}' missing from {context}")]
    MissingColumn { column: String, context: String },

    #[error("Duplicate key {key} in {table}")]
    DuplicateKey { table: String, key: String },

    #[error("Data integrity violation: {message}")]
    DataIntegrity { message: String },

    #[error("Insufficient data: {message}")]
    InsufficientData { message: String },

    #[error("Invalid season: {season} ({reason})")]
    InvalidSeason { season: i64, reason: String },

    #[error("Invalid week: {week}")]
    InvalidWeek { week: i64 },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse number: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("Table operation failed: {0}")]
    Decode(#[from] polars::error::PolarsError),
}

fn fmt_row(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" at row {}", r),
        None => String::new(),
    }
}

impl NflDataError {
    pub(crate) fn unavailable(
        provider: impl Into<String>,
        location: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        NflDataError::SourceUnavailable {
            provider: provider.into(),
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn integrity(message: impl Into<String>) -> Self {
        NflDataError::DataIntegrity {
            message: message.into(),
        }
    }

    pub(crate) fn missing_column(column: impl Into<String>, context: impl Into<String>) -> Self {
        NflDataError::MissingColumn {
            column: column.into(),
            context: context.into(),
        }
    }

    /// True for failures that originate upstream rather than in the data itself.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, NflDataError::SourceUnavailable { .. })
    }
}
