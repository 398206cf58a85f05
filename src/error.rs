//! Centralized error handling for the insightbox engine.
//!
//! Every user-recoverable failure an operation can produce maps to a variant
//! here, and each one yields a failed [`MutationReport`] with the table left
//! untouched; the engine never panics on user input. The only condition
//! treated as a defect is an internal shape violation surfacing from polars,
//! which arrives as [`InsightError::DataProcessing`].
//!
//! The presentation layer consumes errors as plain strings, so
//! `From<InsightError> for String` is implemented for that boundary.
//!
//! [`MutationReport`]: crate::engine::types::MutationReport

use std::fmt;

/// Main error type for engine operations.
#[derive(Debug)]
pub enum InsightError {
    /// No columns (or rows) were selected for an operation that requires scoping.
    SelectionEmpty(String),

    /// A column could not be coerced to the requested type.
    /// Carries the offending source values (capped for display).
    TypeConversionFailure { column: String, values: Vec<String> },

    /// A new column name collides with an existing column.
    NameCollision(String),

    /// Wrong number of operands (fewer than two merge columns, identical
    /// formula operands, and the like).
    InvalidOperandCount(String),

    /// A user-supplied literal could not be parsed as the required type.
    ParseFailure(String),

    /// A named column does not exist in the current table.
    ColumnNotFound(String),

    /// Data processing errors (polars faults, internal shape violations).
    DataProcessing(String),

    /// I/O errors (export, log files).
    Io(std::io::Error),

    /// Generic error with context.
    Other(String),
}

impl fmt::Display for InsightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionEmpty(msg) => write!(f, "No columns selected: {msg}"),
            Self::TypeConversionFailure { column, values } => {
                write!(
                    f,
                    "Cannot convert column '{column}': offending values [{}]",
                    values.join(", ")
                )
            }
            Self::NameCollision(name) => {
                write!(f, "Column name '{name}' already exists")
            }
            Self::InvalidOperandCount(msg) => write!(f, "Invalid operands: {msg}"),
            Self::ParseFailure(msg) => write!(f, "Parse failure: {msg}"),
            Self::ColumnNotFound(name) => write!(f, "Column '{name}' does not exist"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for InsightError {}

impl From<std::io::Error> for InsightError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<polars::error::PolarsError> for InsightError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<anyhow::Error> for InsightError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for InsightError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(format!("JSON error: {err}"))
    }
}

// The presentation layer wants plain strings.
impl From<InsightError> for String {
    fn from(err: InsightError) -> Self {
        err.to_string()
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<InsightError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: InsightError = e.into();
            InsightError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: InsightError = e.into();
            InsightError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InsightError::ColumnNotFound("age".to_owned());
        assert_eq!(err.to_string(), "Column 'age' does not exist");

        let err = InsightError::TypeConversionFailure {
            column: "price".to_owned(),
            values: vec!["abc".to_owned(), "n/a".to_owned()],
        };
        assert!(err.to_string().contains("price"));
        assert!(err.to_string().contains("abc, n/a"));
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = InsightError::NameCollision("total".to_owned());
        let s: String = err.into();
        assert_eq!(s, "Column name 'total' already exists");
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "data.csv",
        ));

        let result: Result<()> = result.context("Failed to export table");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to export table")
        );
    }
}
