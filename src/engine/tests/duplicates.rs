use crate::engine::duplicates;
use crate::engine::types::KeepStrategy;
use crate::error::InsightError;
use crate::selection::ColumnSelection;
use anyhow::Result;
use polars::prelude::*;

fn all_columns() -> ColumnSelection {
    let mut sel = ColumnSelection::default();
    sel.set_all();
    sel
}

fn sample() -> Result<DataFrame> {
    // Rows: A, B, A. Row 0 and row 2 duplicate each other.
    Ok(df!(
        "k" => &["A", "B", "A"],
        "v" => &[1i64, 2, 1]
    )?)
}

#[test]
fn test_keep_last_keeps_rows_in_order() -> Result<()> {
    let df = sample()?;
    let outcome = duplicates::resolve(&df, &all_columns(), KeepStrategy::Last)?;

    assert_eq!(outcome.affected, 1);
    assert_eq!(outcome.table.height(), 2);

    let s = outcome.table.column("k")?.as_materialized_series().clone();
    let ca = s.str()?;
    assert_eq!(ca.get(0), Some("B"));
    assert_eq!(ca.get(1), Some("A"));
    Ok(())
}

#[test]
fn test_keep_first() -> Result<()> {
    let df = sample()?;
    let outcome = duplicates::resolve(&df, &all_columns(), KeepStrategy::First)?;

    let s = outcome.table.column("k")?.as_materialized_series().clone();
    let ca = s.str()?;
    assert_eq!(ca.get(0), Some("A"));
    assert_eq!(ca.get(1), Some("B"));
    Ok(())
}

#[test]
fn test_keep_none_removes_whole_groups() -> Result<()> {
    let df = sample()?;
    let outcome = duplicates::resolve(&df, &all_columns(), KeepStrategy::None)?;

    assert_eq!(outcome.affected, 2);
    assert_eq!(outcome.table.height(), 1);

    let s = outcome.table.column("k")?.as_materialized_series().clone();
    assert_eq!(s.str()?.get(0), Some("B"));
    Ok(())
}

#[test]
fn test_custom_key_subset() -> Result<()> {
    let df = df!(
        "k" => &["A", "A", "B"],
        "v" => &[1i64, 2, 3]
    )?;
    let mut sel = ColumnSelection::default();
    sel.set_custom(vec!["k".to_owned()]);

    // Under key {k}, rows 0 and 1 are duplicates even though "v" differs.
    let outcome = duplicates::resolve(&df, &sel, KeepStrategy::First)?;
    assert_eq!(outcome.affected, 1);
    assert_eq!(outcome.table.height(), 2);
    Ok(())
}

#[test]
fn test_missing_equals_missing() -> Result<()> {
    let df = df!(
        "k" => &[None::<&str>, None, Some("x")],
        "v" => &[1i64, 1, 1]
    )?;

    let preview = duplicates::find_duplicates(&df, &all_columns())?;
    assert_eq!(preview.height(), 2);

    let outcome = duplicates::resolve(&df, &all_columns(), KeepStrategy::First)?;
    assert_eq!(outcome.affected, 1);
    Ok(())
}

#[test]
fn test_preview_includes_all_group_members() -> Result<()> {
    let df = sample()?;
    let preview = duplicates::find_duplicates(&df, &all_columns())?;
    // Both the first and the last "A" row appear in the preview.
    assert_eq!(preview.height(), 2);
    Ok(())
}

#[test]
fn test_requires_selection() -> Result<()> {
    let df = sample()?;
    let result = duplicates::resolve(&df, &ColumnSelection::default(), KeepStrategy::First);
    assert!(matches!(result, Err(InsightError::SelectionEmpty(_))));
    Ok(())
}
