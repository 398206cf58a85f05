//! Type Coercion Service.
//!
//! Converts a column between semantic types with validation and loss
//! reporting. The default policy is fail-fast: a numeric conversion that
//! would null out values fails with the offending values listed, unless the
//! caller explicitly allows the loss. Timestamp conversion is always strict,
//! and integer conversion of fractional values always fails.

use super::types::{ColumnType, MutationOutcome};
use crate::error::{InsightError, Result};
use polars::prelude::*;

/// Converts `column` to the requested semantic type.
///
/// `allow_lossy` opts in to numeric conversions that turn unparseable
/// values into missing cells; the loss is still reported in the message.
pub fn coerce_column(
    df: &DataFrame,
    column: &str,
    target: ColumnType,
    allow_lossy: bool,
) -> Result<MutationOutcome> {
    let s = df
        .column(column)
        .map_err(|_| InsightError::ColumnNotFound(column.to_owned()))?
        .as_materialized_series()
        .clone();

    let mut loss_note = String::new();
    let converted = match target {
        ColumnType::Text => s.cast(&DataType::String)?,
        ColumnType::Category => s.cast(&DataType::Categorical(None, Default::default()))?,
        ColumnType::Float => {
            let converted = s.cast(&DataType::Float64)?;
            let lost = lost_values(&s, &converted)?;
            if !lost.is_empty() {
                if !allow_lossy {
                    return Err(InsightError::TypeConversionFailure {
                        column: column.to_owned(),
                        values: lost,
                    });
                }
                loss_note = format!("; {} non-numeric values became missing", lost.len());
            }
            converted
        }
        ColumnType::Integer => {
            let widened = s.cast(&DataType::Float64)?;
            let lost = lost_values(&s, &widened)?;
            if !lost.is_empty() && !allow_lossy {
                return Err(InsightError::TypeConversionFailure {
                    column: column.to_owned(),
                    values: lost,
                });
            }

            let mut fractional = Vec::new();
            for v in widened.f64()?.into_iter().flatten() {
                if !(v.is_finite() && v.fract() == 0.0) {
                    fractional.push(v.to_string());
                    if fractional.len() >= 10 {
                        break;
                    }
                }
            }
            if !fractional.is_empty() {
                return Err(InsightError::TypeConversionFailure {
                    column: column.to_owned(),
                    values: fractional,
                });
            }

            if !lost.is_empty() {
                loss_note = format!("; {} non-numeric values became missing", lost.len());
            }
            widened.cast(&DataType::Int64)?
        }
        ColumnType::Timestamp => {
            // Text columns go through datetime parsing rather than a plain
            // cast, which would null out every value instead of reading it.
            let converted = if s.dtype() == &DataType::String {
                let options = StrptimeOptions {
                    strict: false,
                    ..Default::default()
                };
                df.clone()
                    .lazy()
                    .select([col(column).str().to_datetime(
                        Some(TimeUnit::Milliseconds),
                        None,
                        options,
                        lit("raise"),
                    )])
                    .collect()?
                    .column(column)?
                    .as_materialized_series()
                    .clone()
            } else {
                s.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            };
            // Strict regardless of allow_lossy: a value that does not parse
            // as a timestamp aborts the conversion.
            let lost = lost_values(&s, &converted)?;
            if !lost.is_empty() {
                return Err(InsightError::TypeConversionFailure {
                    column: column.to_owned(),
                    values: lost,
                });
            }
            converted
        }
    };

    let mut out = df.clone();
    out.replace(column, converted)?;

    let affected = out.height();
    tracing::info!(column, %target, "coerced column type");
    Ok(MutationOutcome::new(
        out,
        format!("Changed type of column '{column}' to {target}{loss_note}"),
        affected,
    ))
}

/// Values present in the original but missing after conversion, rendered as
/// text, deduplicated in first-encountered order and capped for display.
fn lost_values(original: &Series, converted: &Series) -> Result<Vec<String>> {
    let rendered = original.cast(&DataType::String)?;
    let ca = rendered.str()?;

    let mut lost: Vec<String> = Vec::new();
    for (orig, conv_null) in ca.into_iter().zip(converted.is_null().into_iter()) {
        if let Some(v) = orig
            && conv_null == Some(true)
            && !lost.iter().any(|x| x == v)
        {
            lost.push(v.to_owned());
            if lost.len() >= 10 {
                break;
            }
        }
    }
    Ok(lost)
}
