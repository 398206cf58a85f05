//! Column selection model shared by every scoped operation.
//!
//! A selection is either "all columns" or an explicit custom set; activating
//! one mode clears the other. Resolution always happens against the live
//! table, so names that a prior operation removed are silently dropped
//! instead of failing.

use crate::error::{InsightError, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Which columns an operation applies to.
///
/// `Unset` is the initial state of a fresh session; resolving it yields an
/// empty set, which operations that require scoping must refuse to commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSelection {
    #[default]
    Unset,
    All,
    Custom(Vec<String>),
}

impl ColumnSelection {
    /// Activates "all columns" mode, clearing any custom set.
    pub fn set_all(&mut self) {
        *self = Self::All;
    }

    /// Activates custom mode with the given names, clearing "all columns"
    /// mode. Duplicates are removed, first occurrence wins.
    pub fn set_custom(&mut self, names: Vec<String>) {
        let mut seen = Vec::with_capacity(names.len());
        for name in names {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        *self = Self::Custom(seen);
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Resolves the selection against the current table schema.
    ///
    /// Returns the column names in table order. Custom names that no longer
    /// exist in the table are dropped without error; `Unset` resolves empty.
    pub fn resolve(&self, df: &DataFrame) -> Vec<String> {
        match self {
            Self::Unset => Vec::new(),
            Self::All => df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            Self::Custom(names) => df
                .get_column_names()
                .iter()
                .map(|s| s.as_str())
                .filter(|c| names.iter().any(|n| n == c))
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Like [`resolve`](Self::resolve), but an empty resolution is a
    /// [`SelectionEmpty`](InsightError::SelectionEmpty) failure.
    pub fn resolve_required(&self, df: &DataFrame) -> Result<Vec<String>> {
        let cols = self.resolve(df);
        if cols.is_empty() {
            return Err(InsightError::SelectionEmpty(
                "choose all columns or at least one custom column".to_owned(),
            ));
        }
        Ok(cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> DataFrame {
        df!(
            "a" => &[1, 2],
            "b" => &["x", "y"],
            "c" => &[0.5, 1.5]
        )
        .expect("valid frame")
    }

    #[test]
    fn test_modes_are_exclusive() {
        let mut sel = ColumnSelection::default();
        assert!(sel.is_unset());

        sel.set_custom(vec!["a".to_owned()]);
        sel.set_all();
        assert_eq!(sel, ColumnSelection::All);

        sel.set_custom(vec!["b".to_owned(), "b".to_owned()]);
        assert_eq!(sel, ColumnSelection::Custom(vec!["b".to_owned()]));
    }

    #[test]
    fn test_resolve_all_returns_table_order() {
        let df = sample();
        let mut sel = ColumnSelection::default();
        sel.set_all();
        assert_eq!(sel.resolve(&df), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_resolve_drops_stale_names() {
        let df = sample();
        let mut sel = ColumnSelection::default();
        sel.set_custom(vec!["c".to_owned(), "removed".to_owned(), "a".to_owned()]);
        // Table order, not selection order; unknown names silently dropped.
        assert_eq!(sel.resolve(&df), vec!["a", "c"]);
    }

    #[test]
    fn test_unset_rejects_required() {
        let df = sample();
        let sel = ColumnSelection::default();
        assert!(sel.resolve(&df).is_empty());
        assert!(matches!(
            sel.resolve_required(&df),
            Err(crate::error::InsightError::SelectionEmpty(_))
        ));
    }

    #[test]
    fn test_empty_custom_rejects_required() {
        let df = sample();
        let mut sel = ColumnSelection::default();
        sel.set_custom(vec![]);
        assert!(sel.resolve_required(&df).is_err());
    }
}
