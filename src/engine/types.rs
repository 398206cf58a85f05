//! Parameter and result types shared across the mutation operations.
//!
//! Everything here is serde-serializable so the presentation layer can ship
//! operation parameters in and mutation reports out as JSON. The live
//! `DataFrame` itself is skipped during serialization; the front end renders
//! it through its own grid.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Statistic used when filling missing numeric values.
#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum NumericFill {
    #[default]
    Mean,
    Median,
    Zero,
}

impl NumericFill {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Zero => "zero",
        }
    }
}

/// Which rows of a duplicate group survive resolution.
#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum KeepStrategy {
    #[default]
    First,
    Last,
    /// Every row participating in any duplicate group is removed.
    None,
}

/// Text normalization operation, applied per cell to non-missing values.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum NormalizeOp {
    Lowercase,
    Uppercase,
    /// First character uppercased, remainder lowercased.
    Capitalize,
    /// Trim leading and trailing whitespace.
    TrimWhitespace,
    /// Remove characters that are neither alphanumeric nor whitespace.
    StripSymbols,
}

/// Arithmetic operator for formula columns.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// Right operand of a formula column: a second column or a numeric literal
/// as entered by the user (parsed at commit time).
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Operand {
    Column(String),
    Literal(String),
}

/// Semantic column type targeted by the coercion service.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Timestamp,
    Category,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Category => "category",
        };
        write!(f, "{s}")
    }
}

/// Successful result of a mutation operation, before commit.
///
/// Operations never touch their input frame; the produced `table` replaces
/// the session's table only when the session commits it.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub table: DataFrame,
    pub message: String,
    pub affected: usize,
}

impl MutationOutcome {
    pub fn new(table: DataFrame, message: impl Into<String>, affected: usize) -> Self {
        Self {
            table,
            message: message.into(),
            affected,
        }
    }
}

/// What the presentation layer sees after a commit attempt.
///
/// Either the full operation landed (`success`, `table` holds the new frame)
/// or the stored table was left untouched and `message` explains why.
#[derive(Debug, Clone, Serialize)]
pub struct MutationReport {
    pub success: bool,
    pub message: String,
    pub affected: usize,
    #[serde(skip)]
    pub table: Option<DataFrame>,
}

impl MutationReport {
    pub fn from_outcome(outcome: &MutationOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message.clone(),
            affected: outcome.affected,
            table: Some(outcome.table.clone()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            affected: 0,
            table: None,
        }
    }
}
