//! Manual-edit reconciliation.
//!
//! The presentation grid hands back a full edited frame in which numeric
//! cells typically arrive as floats. [`reconcile`] is a pure per-column pass
//! that folds a float column back into nullable integers when every present
//! value is exactly integral; a single fractional value abandons the whole
//! column's coercion and the float representation stands.

use super::types::MutationOutcome;
use crate::error::Result;
use polars::prelude::*;

/// Reconciles one column. Precedence: exact-integral numeric over
/// floating-point numeric over text; never mutates in place.
pub fn reconcile(s: &Series) -> Result<Series> {
    if !s.dtype().is_float() {
        return Ok(s.clone());
    }

    let widened = s.cast(&DataType::Float64)?;
    let ca = widened.f64()?;
    let integral = ca.into_iter().flatten().all(|v| {
        v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64
    });

    if integral {
        Ok(s.cast(&DataType::Int64)?)
    } else {
        Ok(s.clone())
    }
}

/// Applies [`reconcile`] to every column of an edited frame.
pub fn reconcile_frame(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for name in names {
        let s = out.column(&name)?.as_materialized_series().clone();
        let reconciled = reconcile(&s)?;
        if reconciled.dtype() != s.dtype() {
            out.replace(&name, reconciled)?;
        }
    }
    Ok(out)
}

/// Produces the commit outcome for an edited frame, or `None` when the
/// reconciled edit is identical to the stored table (a no-op).
pub fn commit_edits(current: &DataFrame, edited: &DataFrame) -> Result<Option<MutationOutcome>> {
    let reconciled = reconcile_frame(edited)?;
    if reconciled.equals_missing(current) {
        return Ok(None);
    }

    let affected = count_changed_rows(current, &reconciled)?;
    tracing::info!(affected, "manual edits committed");
    Ok(Some(MutationOutcome::new(
        reconciled,
        format!("Applied manual edits affecting {affected} rows"),
        affected,
    )))
}

/// Rows that differ between two frames. When shapes or schemas diverge
/// (rows inserted or deleted, columns changed) the row-count delta, or the
/// full new height, stands in for a cell-level diff.
fn count_changed_rows(old: &DataFrame, new: &DataFrame) -> Result<usize> {
    if old.height() != new.height() {
        return Ok(old.height().abs_diff(new.height()));
    }
    let old_names = old.get_column_names();
    let new_names = new.get_column_names();
    if old_names != new_names {
        return Ok(new.height());
    }

    let mut changed = vec![false; new.height()];
    for name in new_names {
        let a = old.column(name.as_str())?.cast(&DataType::String)?;
        let b = new.column(name.as_str())?.cast(&DataType::String)?;
        let (a, b) = (
            a.as_materialized_series().str()?,
            b.as_materialized_series().str()?,
        );
        for (i, (va, vb)) in a.into_iter().zip(b.into_iter()).enumerate() {
            if va != vb {
                changed[i] = true;
            }
        }
    }
    Ok(changed.iter().filter(|c| **c).count())
}
