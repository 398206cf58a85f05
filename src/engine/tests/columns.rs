use crate::engine::columns;
use crate::error::InsightError;
use anyhow::Result;
use polars::prelude::*;

fn sample() -> Result<DataFrame> {
    Ok(df!(
        "a" => &[1i64, 2],
        "b" => &["x", "y"],
        "c" => &[0.5f64, 1.5]
    )?)
}

#[test]
fn test_remove_columns() -> Result<()> {
    let df = sample()?;
    let outcome = columns::remove_columns(&df, &["b".to_owned(), "c".to_owned()])?;
    assert_eq!(outcome.affected, 2);
    assert_eq!(outcome.table.width(), 1);
    assert!(outcome.table.column("a").is_ok());
    Ok(())
}

#[test]
fn test_remove_is_idempotent_for_stale_names() -> Result<()> {
    let df = sample()?;
    let outcome = columns::remove_columns(&df, &["gone".to_owned()])?;
    assert_eq!(outcome.affected, 0);
    assert_eq!(outcome.table.width(), 3);
    assert!(outcome.message.contains("nothing removed"));
    Ok(())
}

#[test]
fn test_remove_mixed_known_and_stale() -> Result<()> {
    let df = sample()?;
    let outcome = columns::remove_columns(&df, &["a".to_owned(), "gone".to_owned()])?;
    assert_eq!(outcome.affected, 1);
    assert_eq!(outcome.table.width(), 2);
    Ok(())
}

#[test]
fn test_remove_rejects_empty_set() -> Result<()> {
    let df = sample()?;
    let result = columns::remove_columns(&df, &[]);
    assert!(matches!(result, Err(InsightError::SelectionEmpty(_))));
    Ok(())
}

#[test]
fn test_rename_column() -> Result<()> {
    let df = sample()?;
    let outcome = columns::rename_column(&df, "a", "id")?;
    assert!(outcome.table.column("id").is_ok());
    assert!(outcome.table.column("a").is_err());
    // Renaming keeps the column position.
    assert_eq!(outcome.table.get_column_names()[0].as_str(), "id");
    Ok(())
}

#[test]
fn test_rename_validations() -> Result<()> {
    let df = sample()?;

    let result = columns::rename_column(&df, "a", "");
    assert!(matches!(result, Err(InsightError::ParseFailure(_))));

    let result = columns::rename_column(&df, "a", "a");
    assert!(matches!(result, Err(InsightError::ParseFailure(_))));

    let result = columns::rename_column(&df, "a", "b");
    assert!(matches!(result, Err(InsightError::NameCollision(_))));

    let result = columns::rename_column(&df, "gone", "fresh");
    assert!(matches!(result, Err(InsightError::ColumnNotFound(_))));
    Ok(())
}
