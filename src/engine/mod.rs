//! The dataset mutation engine: scoped, validated, atomically committed
//! operations over the session's table.

pub mod coerce;
pub mod columns;
pub mod derive;
pub mod duplicates;
pub mod edit;
pub mod export;
pub mod missing;
pub mod replace;
pub mod text;
pub mod types;

pub use types::{
    ArithmeticOp, ColumnType, KeepStrategy, MutationOutcome, MutationReport, NormalizeOp,
    NumericFill, Operand,
};

#[cfg(test)]
mod tests;
