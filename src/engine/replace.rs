//! Find/replace against a single target column, and value-based row removal.
//!
//! Numeric columns are strict: both the old and the new value must parse as
//! numbers or the whole operation aborts with no partial replace. Text
//! columns compare whole cells, case-sensitively, no substring or regex.

use super::edit::reconcile;
use super::types::MutationOutcome;
use crate::error::{InsightError, Result};
use polars::prelude::*;

/// Replaces exact occurrences of `old` with `new` in one column.
///
/// The affected count is occurrences before minus occurrences after,
/// computed as two independent scans; a disagreement with the rewrite pass
/// is an internal defect, not a user error.
pub fn replace_value(
    df: &DataFrame,
    column: &str,
    old: &str,
    new: &str,
) -> Result<MutationOutcome> {
    let s = df
        .column(column)
        .map_err(|_| InsightError::ColumnNotFound(column.to_owned()))?
        .as_materialized_series()
        .clone();

    let (replaced, before, after) = if s.dtype().is_primitive_numeric() {
        let old_n = parse_number(old, column)?;
        let new_n = parse_number(new, column)?;

        let widened = s.cast(&DataType::Float64)?;
        let ca = widened.f64()?;
        let before = ca.into_iter().filter(|v| *v == Some(old_n)).count();

        let rewritten: Float64Chunked = ca
            .into_iter()
            .map(|v| v.map(|x| if x == old_n { new_n } else { x }))
            .collect();
        let rewritten = rewritten.with_name(s.name().clone()).into_series();
        let after = rewritten
            .f64()?
            .into_iter()
            .filter(|v| *v == Some(old_n))
            .count();

        // Integral results fold back into nullable integers, as the grid
        // reconciliation does.
        (reconcile(&rewritten)?, before, after)
    } else {
        let rendered = s.cast(&DataType::String)?;
        let ca = rendered.str()?;
        let before = ca.into_iter().filter(|v| *v == Some(old)).count();

        let rewritten: StringChunked = ca
            .into_iter()
            .map(|v| {
                v.map(|x| {
                    if x == old {
                        new.to_owned()
                    } else {
                        x.to_owned()
                    }
                })
            })
            .collect();
        let rewritten = rewritten.with_name(s.name().clone()).into_series();
        let after = rewritten
            .str()?
            .into_iter()
            .filter(|v| *v == Some(old))
            .count();

        (rewritten, before, after)
    };

    let affected = before.checked_sub(after).ok_or_else(|| {
        InsightError::DataProcessing(format!(
            "replace consistency check failed in '{column}': {before} occurrences before, {after} after"
        ))
    })?;

    let mut out = df.clone();
    out.replace(column, replaced)?;

    let message = if affected == 0 {
        format!("No occurrences of '{old}' found in column '{column}'")
    } else {
        format!("Replaced '{old}' with '{new}' in column '{column}' ({affected} cells)")
    };
    tracing::info!(column, affected, "replace applied");
    Ok(MutationOutcome::new(out, message, affected))
}

/// Deletes every row whose value in `column` exactly matches the literal.
///
/// The literal is coerced to the column's type for comparison; zero matches
/// is an informational no-op, not a failure.
pub fn remove_rows_by_value(df: &DataFrame, column: &str, value: &str) -> Result<MutationOutcome> {
    let s = df
        .column(column)
        .map_err(|_| InsightError::ColumnNotFound(column.to_owned()))?
        .as_materialized_series()
        .clone();

    let mask: BooleanChunked = if s.dtype().is_primitive_numeric() {
        let target = parse_number(value, column)?;
        let widened = s.cast(&DataType::Float64)?;
        widened
            .f64()?
            .into_iter()
            .map(|v| Some(v == Some(target)))
            .collect()
    } else {
        let rendered = s.cast(&DataType::String)?;
        rendered
            .str()?
            .into_iter()
            .map(|v| Some(v == Some(value)))
            .collect()
    };

    let matches = mask.sum().unwrap_or(0) as usize;
    if matches == 0 {
        return Ok(MutationOutcome::new(
            df.clone(),
            format!("No rows found with value '{value}' in column '{column}'"),
            0,
        ));
    }

    let out = df.filter(&!&mask)?;
    tracing::info!(column, removed = matches, "removed rows by value");
    Ok(MutationOutcome::new(
        out,
        format!("Removed {matches} rows where column '{column}' equals '{value}'"),
        matches,
    ))
}

fn parse_number(raw: &str, column: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        InsightError::ParseFailure(format!(
            "'{raw}' is not a number; column '{column}' is numeric"
        ))
    })
}
