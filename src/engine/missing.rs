//! Missing-value resolution: drop rows, statistical fills, most-frequent
//! fill for text columns, and manual fill with a user literal.
//!
//! All strategies validate before building a frame and operate in the
//! statistic-then-fill order: a mean or median is always computed over the
//! column's present values, never over a partially filled column.

use super::types::{MutationOutcome, NumericFill};
use crate::error::{InsightError, Result};
use crate::selection::ColumnSelection;
use polars::prelude::*;
use std::collections::HashMap;

/// Removes every row with a missing value in any of the resolved columns.
///
/// With `AllColumns` active a row is dropped when any column is null; with a
/// custom selection only nulls inside the selected columns count.
pub fn drop_missing(df: &DataFrame, selection: &ColumnSelection) -> Result<MutationOutcome> {
    let cols = selection.resolve_required(df)?;

    let mut lf = df.clone().lazy();
    for name in &cols {
        lf = lf.filter(col(name.as_str()).is_not_null());
    }
    let out = lf.collect()?;

    let removed = df.height() - out.height();
    tracing::info!(removed, columns = cols.len(), "dropped rows with missing values");
    Ok(MutationOutcome::new(
        out,
        format!("Removed {removed} rows containing missing values"),
        removed,
    ))
}

/// Fills missing values in the numeric columns of the selection.
///
/// The selection is restricted to numeric columns that currently contain
/// nulls. A column with no present values has no mean or median; such a
/// column is reported as failed in the message while the remaining columns
/// are still filled.
pub fn fill_numeric(
    df: &DataFrame,
    selection: &ColumnSelection,
    strategy: NumericFill,
) -> Result<MutationOutcome> {
    let resolved = selection.resolve_required(df)?;

    let mut candidates = Vec::new();
    for name in &resolved {
        let s = df.column(name)?.as_materialized_series();
        if s.dtype().is_primitive_numeric() && s.null_count() > 0 {
            candidates.push(name.clone());
        }
    }
    if candidates.is_empty() {
        return Err(InsightError::SelectionEmpty(
            "select numeric columns that contain missing values".to_owned(),
        ));
    }

    let mut exprs = Vec::new();
    let mut filled = Vec::new();
    let mut failed = Vec::new();
    let mut affected = 0usize;

    for name in &candidates {
        let s = df.column(name)?.as_materialized_series();
        // Statistic over present values, computed before anything is filled.
        let expr = match strategy {
            NumericFill::Zero => Some(col(name.as_str()).fill_null(lit(0))),
            NumericFill::Mean => s.mean().map(|m| col(name.as_str()).fill_null(lit(m))),
            NumericFill::Median => s.median().map(|m| col(name.as_str()).fill_null(lit(m))),
        };
        match expr {
            Some(e) => {
                affected += s.null_count();
                filled.push(name.clone());
                exprs.push(e);
            }
            None => failed.push(name.clone()),
        }
    }

    let out = if exprs.is_empty() {
        df.clone()
    } else {
        df.clone().lazy().with_columns(exprs).collect()?
    };

    let mut message = if filled.is_empty() {
        "No columns could be filled".to_owned()
    } else {
        format!(
            "Filled {affected} missing values in [{}] with the {} value",
            filled.join(", "),
            strategy.as_str()
        )
    };
    if !failed.is_empty() {
        message.push_str(&format!(
            "; no {} available for entirely missing columns [{}]",
            strategy.as_str(),
            failed.join(", ")
        ));
    }

    tracing::info!(affected, strategy = strategy.as_str(), "numeric fill applied");
    Ok(MutationOutcome::new(out, message, affected))
}

/// Fills missing values in text/categorical columns with the most frequent
/// present value of each column.
///
/// Ties break by first-encountered order. A column that is entirely missing
/// has no mode; it is skipped with a warning in the message.
pub fn fill_most_frequent(df: &DataFrame, selection: &ColumnSelection) -> Result<MutationOutcome> {
    let resolved = selection.resolve_required(df)?;

    let mut candidates = Vec::new();
    for name in &resolved {
        let s = df.column(name)?.as_materialized_series();
        if matches!(s.dtype(), DataType::String | DataType::Categorical(_, _))
            && s.null_count() > 0
        {
            candidates.push(name.clone());
        }
    }
    if candidates.is_empty() {
        return Err(InsightError::SelectionEmpty(
            "select text or categorical columns that contain missing values".to_owned(),
        ));
    }

    let mut exprs = Vec::new();
    let mut filled = Vec::new();
    let mut skipped = Vec::new();
    let mut affected = 0usize;

    for name in &candidates {
        let s = df.column(name)?.as_materialized_series();
        match most_frequent(s)? {
            Some(mode) => {
                // Categorical: fill in string space, then rebuild the
                // categorical without the stale rev map, which polars
                // refuses to cast into.
                let expr = if let DataType::Categorical(_, ordering) = s.dtype() {
                    col(name.as_str())
                        .cast(DataType::String)
                        .fill_null(lit(mode))
                        .cast(DataType::Categorical(None, *ordering))
                } else {
                    col(name.as_str()).fill_null(lit(mode))
                };
                affected += s.null_count();
                filled.push(name.clone());
                exprs.push(expr);
            }
            None => skipped.push(name.clone()),
        }
    }

    let out = if exprs.is_empty() {
        df.clone()
    } else {
        df.clone().lazy().with_columns(exprs).collect()?
    };

    let mut message = if filled.is_empty() {
        "No columns could be filled".to_owned()
    } else {
        format!(
            "Filled {affected} missing values in [{}] with the most frequent value",
            filled.join(", ")
        )
    };
    if !skipped.is_empty() {
        message.push_str(&format!(
            "; skipped entirely missing columns [{}]",
            skipped.join(", ")
        ));
    }

    tracing::info!(affected, "most-frequent fill applied");
    Ok(MutationOutcome::new(out, message, affected))
}

/// Fills every missing cell in every resolved column with the literal as-is,
/// as text. Target columns are rendered to string dtype; no type conversion
/// of the literal is attempted.
pub fn fill_manual(
    df: &DataFrame,
    selection: &ColumnSelection,
    value: &str,
) -> Result<MutationOutcome> {
    if value.is_empty() {
        return Err(InsightError::ParseFailure(
            "enter a value to fill the missing cells with".to_owned(),
        ));
    }
    let resolved = selection.resolve_required(df)?;

    let mut exprs = Vec::new();
    let mut filled = Vec::new();
    let mut affected = 0usize;
    for name in &resolved {
        let nulls = df.column(name)?.null_count();
        if nulls == 0 {
            continue;
        }
        affected += nulls;
        filled.push(name.clone());
        exprs.push(
            col(name.as_str())
                .cast(DataType::String)
                .fill_null(lit(value.to_owned())),
        );
    }

    if exprs.is_empty() {
        return Ok(MutationOutcome::new(
            df.clone(),
            "No missing values in the selected columns".to_owned(),
            0,
        ));
    }

    let out = df.clone().lazy().with_columns(exprs).collect()?;
    tracing::info!(affected, value, "manual fill applied");
    Ok(MutationOutcome::new(
        out,
        format!(
            "Filled {affected} missing values in [{}] with '{value}'",
            filled.join(", ")
        ),
        affected,
    ))
}

/// Most frequent present value of a column rendered as text.
///
/// Returns `None` for a column with no present values. Ties break by
/// first-encountered order, which polars `mode()` does not guarantee.
fn most_frequent(s: &Series) -> Result<Option<String>> {
    let rendered = s.cast(&DataType::String)?;
    let ca = rendered.str()?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for v in ca.into_iter().flatten() {
        let entry = counts.entry(v).or_insert(0);
        if *entry == 0 {
            order.push(v);
        }
        *entry += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for v in order {
        let count = counts[v];
        // Strictly greater keeps the first-encountered winner on ties.
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((v, count));
        }
    }
    Ok(best.map(|(v, _)| v.to_owned()))
}
