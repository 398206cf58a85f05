//! Text normalization over the selected text/categorical columns.
//!
//! Each operation rewrites every non-missing value of every selected text
//! column; missing values stay missing and categorical columns keep their
//! dtype (the rewrite happens in string space and casts back).

use super::types::{MutationOutcome, NormalizeOp};
use crate::error::{InsightError, Result};
use crate::selection::ColumnSelection;
use polars::prelude::*;

/// Names of the table's text and categorical columns, in table order.
pub fn text_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| matches!(c.dtype(), DataType::String | DataType::Categorical(_, _)))
        .map(|c| c.name().to_string())
        .collect()
}

/// Applies one normalization operation to the text columns of the selection.
pub fn normalize(
    df: &DataFrame,
    selection: &ColumnSelection,
    op: NormalizeOp,
) -> Result<MutationOutcome> {
    let text_cols = text_columns(df);
    if text_cols.is_empty() {
        return Err(InsightError::SelectionEmpty(
            "the dataset has no text columns to normalize".to_owned(),
        ));
    }

    let resolved = selection.resolve_required(df)?;
    let targets: Vec<String> = resolved
        .into_iter()
        .filter(|c| text_cols.contains(c))
        .collect();
    if targets.is_empty() {
        return Err(InsightError::SelectionEmpty(
            "the selected columns contain no text columns".to_owned(),
        ));
    }

    let out = if op == NormalizeOp::Capitalize {
        capitalize_columns(df, &targets)?
    } else {
        let mut exprs = Vec::with_capacity(targets.len());
        for name in &targets {
            let dtype = df.column(name)?.dtype().clone();
            let mut expr = col(name.as_str()).cast(DataType::String);
            expr = match op {
                NormalizeOp::Lowercase => expr.str().to_lowercase(),
                NormalizeOp::Uppercase => expr.str().to_uppercase(),
                NormalizeOp::TrimWhitespace => expr.str().strip_chars(lit(NULL)),
                NormalizeOp::Capitalize => expr,
                NormalizeOp::StripSymbols => {
                    expr.str().replace_all(lit(r"[^\w\s]"), lit(""), false)
                }
            };
            // Rebuild categoricals without the source rev map; casting into
            // an existing rev map is rejected.
            if let DataType::Categorical(_, ordering) = dtype {
                expr = expr.cast(DataType::Categorical(None, ordering));
            }
            exprs.push(expr);
        }
        df.clone().lazy().with_columns(exprs).collect()?
    };

    let affected: usize = targets
        .iter()
        .map(|name| df.height() - df.column(name).map(|c| c.null_count()).unwrap_or(0))
        .sum();

    tracing::info!(columns = targets.len(), ?op, "normalized text columns");
    Ok(MutationOutcome::new(
        out,
        format!("Normalized text in columns [{}]", targets.join(", ")),
        affected,
    ))
}

/// Capitalize has no polars expression equivalent, so it runs as an eager
/// per-column pass.
fn capitalize_columns(df: &DataFrame, targets: &[String]) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in targets {
        let s = out.column(name)?.as_materialized_series().clone();
        let dtype = s.dtype().clone();
        let rendered = s.cast(&DataType::String)?;
        let ca = rendered.str()?;
        let rewritten: StringChunked = ca
            .into_iter()
            .map(|opt| opt.map(capitalize))
            .collect();
        let mut replaced = rewritten.with_name(s.name().clone()).into_series();
        if let DataType::Categorical(_, ordering) = dtype {
            replaced = replaced.cast(&DataType::Categorical(None, ordering))?;
        }
        out.replace(name, replaced)?;
    }
    Ok(out)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}
