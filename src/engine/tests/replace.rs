use crate::engine::replace;
use crate::error::InsightError;
use anyhow::Result;
use polars::prelude::*;

#[test]
fn test_text_replace_whole_cell_only() -> Result<()> {
    let df = df!("t" => &[Some("cat"), Some("catalog"), Some("cat"), None])?;
    let outcome = replace::replace_value(&df, "t", "cat", "dog")?;

    assert_eq!(outcome.affected, 2);
    let s = outcome.table.column("t")?.as_materialized_series().clone();
    let ca = s.str()?;
    assert_eq!(ca.get(0), Some("dog"));
    // Substring occurrences are not touched.
    assert_eq!(ca.get(1), Some("catalog"));
    assert_eq!(ca.get(2), Some("dog"));
    assert_eq!(ca.get(3), None);
    Ok(())
}

#[test]
fn test_text_replace_is_case_sensitive() -> Result<()> {
    let df = df!("t" => &["Cat", "cat"])?;
    let outcome = replace::replace_value(&df, "t", "cat", "dog")?;
    assert_eq!(outcome.affected, 1);
    let s = outcome.table.column("t")?.as_materialized_series().clone();
    assert_eq!(s.str()?.get(0), Some("Cat"));
    Ok(())
}

#[test]
fn test_numeric_replace_parses_both_values() -> Result<()> {
    let df = df!("n" => &[1i64, 2, 1])?;
    let outcome = replace::replace_value(&df, "n", "1", "9")?;

    assert_eq!(outcome.affected, 2);
    let s = outcome.table.column("n")?.as_materialized_series().clone();
    // Integral result folds back to Int64.
    assert_eq!(s.dtype(), &DataType::Int64);
    assert_eq!(s.i64()?.get(0), Some(9));
    assert_eq!(s.i64()?.get(1), Some(2));
    Ok(())
}

#[test]
fn test_numeric_replace_fractional_stays_float() -> Result<()> {
    let df = df!("n" => &[1i64, 2])?;
    let outcome = replace::replace_value(&df, "n", "1", "1.5")?;
    let s = outcome.table.column("n")?.as_materialized_series().clone();
    assert_eq!(s.dtype(), &DataType::Float64);
    assert_eq!(s.f64()?.get(0), Some(1.5));
    Ok(())
}

#[test]
fn test_numeric_replace_aborts_on_unparsable_value() -> Result<()> {
    let df = df!("n" => &[1i64, 2])?;
    let result = replace::replace_value(&df, "n", "abc", "3");
    assert!(matches!(result, Err(InsightError::ParseFailure(_))));

    let result = replace::replace_value(&df, "n", "1", "abc");
    assert!(matches!(result, Err(InsightError::ParseFailure(_))));
    Ok(())
}

#[test]
fn test_replace_unknown_column() -> Result<()> {
    let df = df!("n" => &[1i64])?;
    let result = replace::replace_value(&df, "missing", "1", "2");
    assert!(matches!(result, Err(InsightError::ColumnNotFound(_))));
    Ok(())
}

#[test]
fn test_replace_zero_matches_is_informational() -> Result<()> {
    let df = df!("t" => &["a", "b"])?;
    let outcome = replace::replace_value(&df, "t", "zzz", "q")?;
    assert_eq!(outcome.affected, 0);
    assert!(outcome.message.contains("No occurrences"));
    Ok(())
}

#[test]
fn test_remove_rows_by_text_value() -> Result<()> {
    let df = df!(
        "t" => &["keep", "drop", "keep"],
        "n" => &[1i64, 2, 3]
    )?;
    let outcome = replace::remove_rows_by_value(&df, "t", "drop")?;
    assert_eq!(outcome.affected, 1);
    assert_eq!(outcome.table.height(), 2);
    let s = outcome.table.column("n")?.as_materialized_series().clone();
    assert_eq!(s.i64()?.get(1), Some(3));
    Ok(())
}

#[test]
fn test_remove_rows_by_numeric_value() -> Result<()> {
    let df = df!("n" => &[1.5f64, 2.0, 1.5])?;
    let outcome = replace::remove_rows_by_value(&df, "n", "1.5")?;
    assert_eq!(outcome.affected, 2);
    assert_eq!(outcome.table.height(), 1);
    Ok(())
}

#[test]
fn test_remove_rows_zero_matches_keeps_table() -> Result<()> {
    let df = df!("n" => &[1i64, 2])?;
    let outcome = replace::remove_rows_by_value(&df, "n", "99")?;
    assert_eq!(outcome.affected, 0);
    assert_eq!(outcome.table.height(), 2);
    assert!(outcome.message.contains("No rows found"));
    Ok(())
}

#[test]
fn test_remove_rows_null_cells_never_match() -> Result<()> {
    let df = df!("t" => &[Some("a"), None, Some("a")])?;
    let outcome = replace::remove_rows_by_value(&df, "t", "a")?;
    assert_eq!(outcome.affected, 2);
    assert_eq!(outcome.table.height(), 1);
    Ok(())
}
