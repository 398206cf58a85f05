//! Duplicate detection and resolution.
//!
//! The duplicate key is the resolved column selection; two rows are
//! duplicates when every key column compares equal, with missing equal to
//! missing. Resolution always recomputes duplicates against the frame it is
//! handed, so a commit never acts on a stale preview snapshot.

use super::types::{KeepStrategy, MutationOutcome};
use crate::error::Result;
use crate::selection::ColumnSelection;
use polars::prelude::*;

/// Rows participating in any duplicate group under the current key, for
/// preview before commit.
pub fn find_duplicates(df: &DataFrame, selection: &ColumnSelection) -> Result<DataFrame> {
    let key = selection.resolve_required(df)?;
    let mask = duplicate_mask(df, &key)?;
    Ok(df.filter(&mask)?)
}

/// Removes duplicate rows under the current key, keeping the first or last
/// occurrence of each group, or no member at all.
pub fn resolve(
    df: &DataFrame,
    selection: &ColumnSelection,
    keep: KeepStrategy,
) -> Result<MutationOutcome> {
    let key = selection.resolve_required(df)?;

    let out = match keep {
        KeepStrategy::First => df.unique_stable(Some(&key), UniqueKeepStrategy::First, None)?,
        KeepStrategy::Last => df.unique_stable(Some(&key), UniqueKeepStrategy::Last, None)?,
        KeepStrategy::None => {
            let mask = duplicate_mask(df, &key)?;
            df.filter(&!&mask)?
        }
    };

    let removed = df.height() - out.height();
    let remaining = out.height();
    tracing::info!(removed, remaining, ?keep, "resolved duplicate rows");
    Ok(MutationOutcome::new(
        out,
        format!("Removed {removed} duplicated rows; {remaining} rows remain"),
        removed,
    ))
}

/// Boolean mask marking every row whose key-column values occur more than
/// once, including the first occurrence. Null keys compare equal to null.
fn duplicate_mask(df: &DataFrame, key: &[String]) -> Result<BooleanChunked> {
    let keyed = df.select(key.iter().cloned())?;
    Ok(keyed.is_duplicated()?)
}
