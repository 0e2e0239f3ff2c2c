//! Dataset profiling.
//!
//! Builds a [`DatasetProfile`]: per-column types, missing-value counts,
//! summary statistics, deterministic sample values and pairwise Pearson
//! correlations over the numeric columns. The profile feeds the HTML report
//! and nothing else — the cleaning stage never reads it.

use crate::cleaner::regression::pearson_r;
use crate::error::Result;
use crate::types::{ColumnProfile, CorrelationEntry, DatasetProfile};
use crate::utils::{is_numeric_dtype, paired_complete};
use polars::prelude::*;
use rand::prelude::*;
use std::collections::HashMap;

/// Data profiler for analyzing dataset structure and characteristics.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile an entire dataset.
    pub fn profile_dataset(df: &DataFrame) -> Result<DatasetProfile> {
        let mut column_profiles = Vec::new();
        for col_name in df.get_column_names() {
            column_profiles.push(Self::profile_column(df, col_name.as_str())?);
        }

        let correlations = Self::pairwise_correlations(df)?;

        Ok(DatasetProfile {
            shape: (df.height(), df.width()),
            column_profiles,
            correlations,
        })
    }

    fn profile_column(df: &DataFrame, col_name: &str) -> Result<ColumnProfile> {
        let col = df.column(col_name)?;
        let series = col.as_materialized_series();
        let dtype = format!("{:?}", series.dtype());
        let unique_count = series.n_unique()?;
        let null_count = series.null_count();
        let null_percentage = if df.height() > 0 {
            (null_count as f64 / df.height() as f64) * 100.0
        } else {
            0.0
        };

        let sample_values = Self::sample_values(series)?;
        let inferred_type = Self::infer_column_type(series, &sample_values);
        let characteristics = Self::extract_characteristics(series, &inferred_type)?;

        Ok(ColumnProfile {
            name: col_name.to_string(),
            dtype,
            inferred_type,
            null_count,
            null_percentage,
            unique_count,
            sample_values,
            characteristics,
        })
    }

    /// Up to ten sample values chosen with a fixed-seed rng, so repeated
    /// profiling of the same table shows the same samples.
    fn sample_values(series: &Series) -> Result<Vec<String>> {
        let non_null = series.drop_nulls();
        if non_null.is_empty() {
            return Ok(Vec::new());
        }

        let sample_size = std::cmp::min(10, non_null.len());
        let mut rng = StdRng::seed_from_u64(42);
        let indices: Vec<usize> = (0..non_null.len()).collect();
        let sampled: Vec<usize> = indices
            .choose_multiple(&mut rng, sample_size)
            .copied()
            .collect();

        let mut values = Vec::with_capacity(sample_size);
        for idx in sampled {
            values.push(format!("{}", non_null.get(idx)?));
        }
        Ok(values)
    }

    /// Semantic type: "numeric" for numeric dtypes, "token_list" for string
    /// columns whose values are mostly comma-separated lists, "text"
    /// otherwise.
    fn infer_column_type(series: &Series, sample_values: &[String]) -> String {
        if is_numeric_dtype(series.dtype()) {
            return "numeric".to_string();
        }

        if matches!(series.dtype(), DataType::String) && !sample_values.is_empty() {
            let with_commas = sample_values.iter().filter(|v| v.contains(',')).count();
            if with_commas * 2 >= sample_values.len() {
                return "token_list".to_string();
            }
        }

        "text".to_string()
    }

    fn extract_characteristics(
        series: &Series,
        inferred_type: &str,
    ) -> Result<HashMap<String, serde_json::Value>> {
        let mut characteristics = HashMap::new();

        match inferred_type {
            "numeric" => {
                let non_null = series.drop_nulls();
                if non_null.is_empty() {
                    return Ok(characteristics);
                }
                let floats = non_null.cast(&DataType::Float64)?;
                let values: Vec<f64> = floats.f64()?.into_iter().flatten().collect();

                let mean = values.iter().sum::<f64>() / values.len() as f64;
                let std = sample_std(&values, mean);
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

                characteristics.insert("mean".to_string(), serde_json::json!(mean));
                characteristics.insert("std".to_string(), serde_json::json!(std));
                characteristics.insert("min".to_string(), serde_json::json!(min));
                characteristics.insert("max".to_string(), serde_json::json!(max));
                characteristics.insert(
                    "skewness".to_string(),
                    serde_json::json!(skewness(&values, mean, std)),
                );
            }
            "token_list" => {
                let tokens = crate::utils::explode_tokens(series)?;
                let distinct: std::collections::HashSet<&str> =
                    tokens.iter().map(|t| t.as_str()).collect();
                characteristics
                    .insert("distinct_tokens".to_string(), serde_json::json!(distinct.len()));
            }
            _ => {
                if let Some(most_frequent) = string_mode(series)? {
                    characteristics
                        .insert("most_frequent".to_string(), serde_json::json!(most_frequent));
                }
            }
        }

        Ok(characteristics)
    }

    /// Pearson correlation for every pair of numeric columns, complete-case
    /// per pair.
    fn pairwise_correlations(df: &DataFrame) -> Result<Vec<CorrelationEntry>> {
        let numeric_cols: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| is_numeric_dtype(c.dtype()))
            .map(|c| c.name().to_string())
            .collect();

        let mut correlations = Vec::new();
        for (i, left) in numeric_cols.iter().enumerate() {
            for right in numeric_cols.iter().skip(i + 1) {
                let (xs, ys) = paired_complete(df, left, right)?;
                if let Some(r) = pearson_r(&xs, &ys) {
                    correlations.push(CorrelationEntry {
                        left: left.clone(),
                        right: right.clone(),
                        pearson_r: r,
                    });
                }
            }
        }
        Ok(correlations)
    }
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Population skewness; zero for degenerate spreads.
fn skewness(values: &[f64], mean: f64, std: f64) -> f64 {
    if std == 0.0 || values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    values.iter().map(|v| ((v - mean) / std).powi(3)).sum::<f64>() / n
}

/// Most frequent string value; ties go to the value seen first.
fn string_mode(series: &Series) -> Result<Option<String>> {
    let ca = match series.str() {
        Ok(ca) => ca,
        Err(_) => return Ok(None),
    };

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in ca.into_iter().enumerate() {
        if let Some(value) = value {
            let entry = counts.entry(value).or_insert((0, idx));
            entry.0 += 1;
        }
    }

    let mut best: Option<(&str, usize, usize)> = None;
    for (value, (count, first_idx)) in &counts {
        let improves = match best {
            Some((_, max, best_idx)) => *count > max || (*count == max && *first_idx < best_idx),
            None => true,
        };
        if improves {
            best = Some((*value, *count, *first_idx));
        }
    }

    Ok(best.map(|(value, _, _)| value.to_string()))
}
