//! Column-level structural operations: removal and rename.

use super::types::MutationOutcome;
use crate::error::{InsightError, Result};
use polars::prelude::*;

/// Removes the named columns from the table.
///
/// Names that no longer exist are skipped silently, so re-removing a column
/// is a no-op rather than a failure. An empty name set is rejected.
pub fn remove_columns(df: &DataFrame, names: &[String]) -> Result<MutationOutcome> {
    if names.is_empty() {
        return Err(InsightError::SelectionEmpty(
            "select at least one column to remove".to_owned(),
        ));
    }

    let out = df.drop_many(names.iter().map(String::as_str));
    let removed = df.width() - out.width();

    let message = if removed == 0 {
        "None of the named columns exist; nothing removed".to_owned()
    } else {
        format!("Removed {removed} columns")
    };
    tracing::info!(removed, "removed columns");
    Ok(MutationOutcome::new(out, message, removed))
}

/// Renames one column. The new name must be non-empty, differ from the old
/// one and not collide with another column.
pub fn rename_column(df: &DataFrame, old: &str, new: &str) -> Result<MutationOutcome> {
    if new.is_empty() || new == old {
        return Err(InsightError::ParseFailure(
            "enter a new name different from the current one".to_owned(),
        ));
    }
    if df.column(new).is_ok() {
        return Err(InsightError::NameCollision(new.to_owned()));
    }
    if df.column(old).is_err() {
        return Err(InsightError::ColumnNotFound(old.to_owned()));
    }

    let mut out = df.clone();
    out.rename(old, new.into())?;
    tracing::info!(old, new, "renamed column");
    Ok(MutationOutcome::new(
        out,
        format!("Renamed column '{old}' to '{new}'"),
        1,
    ))
}
