//! Serialization boundary: the table rendered as delimited text for
//! download. Header row, comma separators, UTF-8, missing values as empty
//! fields. This is the only wire format the engine supports.

use crate::error::{InsightError, Result};
use polars::prelude::*;

/// Encodes the table as CSV text.
pub fn to_csv_string(df: &DataFrame) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    let mut frame = df.clone();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut frame)?;

    String::from_utf8(buf)
        .map_err(|e| InsightError::DataProcessing(format!("CSV output was not UTF-8: {e}")))
}
