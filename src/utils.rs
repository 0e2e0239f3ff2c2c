//! Shared utilities for the analysis pipeline.
//!
//! Small helpers used across the profiler, cleaner and analyzer: dtype
//! checks, numeric column extraction and comma-list token explosion.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Fetch a column as a materialized Series, mapping the polars "not found"
/// error to the crate's `ColumnNotFound`.
pub fn column_series(df: &DataFrame, name: &str) -> Result<Series> {
    let col = df
        .column(name)
        .map_err(|_| AnalysisError::ColumnNotFound(name.to_string()))?;
    Ok(col.as_materialized_series().clone())
}

/// Fetch a column cast to Float64.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Series> {
    let series = column_series(df, name)?;
    Ok(series.cast(&DataType::Float64)?)
}

/// Extract the complete-case value pairs of two columns: rows where both
/// values are present, in table order.
pub fn paired_complete(df: &DataFrame, x_col: &str, y_col: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let xs = numeric_column(df, x_col)?;
    let ys = numeric_column(df, y_col)?;
    let xa = xs.f64()?;
    let ya = ys.f64()?;

    let mut x_vals = Vec::new();
    let mut y_vals = Vec::new();
    for (x, y) in xa.into_iter().zip(ya.into_iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            x_vals.push(x);
            y_vals.push(y);
        }
    }
    Ok((x_vals, y_vals))
}

/// Explode a comma-separated list column into individual trimmed tokens,
/// preserving row order. Null rows contribute nothing; empty tokens are
/// dropped.
pub fn explode_tokens(series: &Series) -> Result<Vec<String>> {
    let ca = series.str()?;
    let mut tokens = Vec::new();
    for value in ca.into_iter().flatten() {
        for token in value.split(',') {
            let token = token.trim();
            if !token.is_empty() {
                tokens.push(token.to_string());
            }
        }
    }
    Ok(tokens)
}
