//! Derived columns: arithmetic formula columns and ordered text merges.

use super::types::{ArithmeticOp, MutationOutcome, Operand};
use crate::error::{InsightError, Result};
use polars::prelude::*;

/// Creates a new column from `left <op> right`.
///
/// Both operands are evaluated in `Float64`; division follows IEEE
/// semantics, so dividing by zero yields an infinity and `0/0` yields NaN
/// rather than failing, for column and literal right operands alike.
pub fn formula_column(
    df: &DataFrame,
    new_name: &str,
    left: &str,
    op: ArithmeticOp,
    right: &Operand,
) -> Result<MutationOutcome> {
    if new_name.is_empty() {
        return Err(InsightError::ParseFailure(
            "enter a name for the new column".to_owned(),
        ));
    }
    if df.column(new_name).is_ok() {
        return Err(InsightError::NameCollision(new_name.to_owned()));
    }
    require_numeric(df, left)?;

    let left_expr = col(left).cast(DataType::Float64);
    let right_expr = match right {
        Operand::Column(name) => {
            if name == left {
                return Err(InsightError::InvalidOperandCount(
                    "select two different columns".to_owned(),
                ));
            }
            require_numeric(df, name)?;
            col(name.as_str()).cast(DataType::Float64)
        }
        Operand::Literal(raw) => {
            let value = raw.trim().parse::<f64>().map_err(|_| {
                InsightError::ParseFailure(format!("'{raw}' is not a numeric value"))
            })?;
            lit(value)
        }
    };

    let combined = match op {
        ArithmeticOp::Add => left_expr + right_expr,
        ArithmeticOp::Subtract => left_expr - right_expr,
        ArithmeticOp::Multiply => left_expr * right_expr,
        ArithmeticOp::Divide => left_expr / right_expr,
    };

    let out = df
        .clone()
        .lazy()
        .with_column(combined.alias(new_name))
        .collect()?;

    let affected = out.height();
    tracing::info!(new_name, op = op.symbol(), "created formula column");
    Ok(MutationOutcome::new(
        out,
        format!("Created column '{new_name}' = {left} {} {}", op.symbol(), describe(right)),
        affected,
    ))
}

/// Creates a new column by concatenating ≥2 source columns in order, with a
/// separator between adjacent values. Every source value is rendered as
/// text; a missing value renders as an empty string, so the merge itself
/// never produces missing cells.
pub fn merge_columns(
    df: &DataFrame,
    new_name: &str,
    sources: &[String],
    separator: &str,
) -> Result<MutationOutcome> {
    if new_name.is_empty() {
        return Err(InsightError::ParseFailure(
            "enter a name for the new column".to_owned(),
        ));
    }
    if df.column(new_name).is_ok() {
        return Err(InsightError::NameCollision(new_name.to_owned()));
    }
    if sources.len() < 2 {
        return Err(InsightError::InvalidOperandCount(
            "select two or more columns to merge".to_owned(),
        ));
    }

    let mut exprs = Vec::with_capacity(sources.len());
    for name in sources {
        if df.column(name).is_err() {
            return Err(InsightError::ColumnNotFound(name.clone()));
        }
        exprs.push(
            col(name.as_str())
                .cast(DataType::String)
                .fill_null(lit("")),
        );
    }

    let out = df
        .clone()
        .lazy()
        .with_column(concat_str(exprs, separator, false).alias(new_name))
        .collect()?;

    let affected = out.height();
    tracing::info!(new_name, sources = sources.len(), "merged columns");
    Ok(MutationOutcome::new(
        out,
        format!(
            "Created column '{new_name}' by merging [{}]",
            sources.join(", ")
        ),
        affected,
    ))
}

fn require_numeric(df: &DataFrame, name: &str) -> Result<()> {
    let s = df
        .column(name)
        .map_err(|_| InsightError::ColumnNotFound(name.to_owned()))?;
    if !s.dtype().is_primitive_numeric() {
        return Err(InsightError::TypeConversionFailure {
            column: name.to_owned(),
            values: vec![format!("dtype {}", s.dtype())],
        });
    }
    Ok(())
}

fn describe(operand: &Operand) -> String {
    match operand {
        Operand::Column(name) => name.clone(),
        Operand::Literal(raw) => raw.trim().to_owned(),
    }
}
