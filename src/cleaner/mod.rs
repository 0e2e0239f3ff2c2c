//! Data cleaning: column renaming and regression-based imputation.
//!
//! Cleaning is a pure transformation: a DataFrame goes in, a new DataFrame
//! and a [`CleaningReport`] come out. Two things happen, in order:
//!
//! 1. Column names with embedded spaces/parentheses are normalized through
//!    the configured rename map (idempotent; absent names are skipped).
//! 2. For each configured [`ImputationRule`], a straight line is fitted once
//!    over the rows where both paired columns are present, missing target
//!    values are filled from that line, and the whole target column is
//!    rounded and cast to integers.

pub mod regression;

pub use regression::{linear_fit, pearson_r};

use crate::config::{ImputationRule, PipelineConfig};
use crate::error::{AnalysisError, Result};
use crate::types::{CleaningReport, ImputationOutcome};
use crate::utils::{numeric_column, paired_complete};
use polars::prelude::*;
use tracing::{debug, info};

/// Applies the rename map and the imputation rules from a [`PipelineConfig`].
pub struct DataCleaner {
    rename_map: Vec<(String, String)>,
    rules: Vec<ImputationRule>,
}

impl DataCleaner {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            rename_map: config.rename_map.clone(),
            rules: config.imputation_rules.clone(),
        }
    }

    /// Clean a dataset: rename columns, then fill missing values per rule.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        let mut df = df;

        let rename_actions = self.apply_renames(&mut df)?;

        let mut imputations = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            imputations.push(Self::impute_pair(&mut df, rule)?);
        }

        Ok((
            df,
            CleaningReport {
                rename_actions,
                imputations,
            },
        ))
    }

    /// Apply the rename map. Entries whose old name is not present are
    /// skipped, so applying the map to an already-renamed table is a no-op.
    fn apply_renames(&self, df: &mut DataFrame) -> Result<Vec<String>> {
        let mut actions = Vec::new();
        for (old, new) in &self.rename_map {
            let present = df.get_column_names().iter().any(|c| c.as_str() == old);
            if present {
                df.rename(old, new.as_str().into())?;
                actions.push(format!("Renamed '{}' to '{}'", old, new));
                debug!("Renamed column '{}' to '{}'", old, new);
            }
        }
        Ok(actions)
    }

    /// Fit target-against-source once over complete-case rows, fill missing
    /// target values from the fitted line, then round the whole target
    /// column to the nearest integer.
    fn impute_pair(df: &mut DataFrame, rule: &ImputationRule) -> Result<ImputationOutcome> {
        let target_series = numeric_column(df, &rule.target)?;
        let nulls_before = target_series.null_count();
        info!("Missing values in '{}': {}", rule.target, nulls_before);

        let (xs, ys) = paired_complete(df, &rule.source, &rule.target)?;
        let fit = regression::linear_fit(&xs, &ys).ok_or_else(|| {
            let reason = if xs.len() < 2 {
                "fewer than two complete-case rows".to_string()
            } else {
                format!("'{}' has zero variance over complete-case rows", rule.source)
            };
            AnalysisError::FitFailed {
                source_col: rule.source.clone(),
                target: rule.target.clone(),
                reason,
            }
        })?;

        info!(
            "Straight line for '{}' against '{}': y = {:.5}x + {:.2} (R² = {:.2})",
            rule.target, rule.source, fit.slope, fit.intercept, fit.r_squared
        );

        let source_series = numeric_column(df, &rule.source)?;
        let sa = source_series.f64()?;
        let ta = target_series.f64()?;

        let mut rows_filled = 0usize;
        let mut values = Vec::with_capacity(df.height());
        for (s, t) in sa.into_iter().zip(ta.into_iter()) {
            let value = match t {
                Some(t) => t,
                None => {
                    let s = s.ok_or_else(|| AnalysisError::ImputationFailed {
                        column: rule.target.clone(),
                        reason: format!("row is missing '{}' to predict from", rule.source),
                    })?;
                    rows_filled += 1;
                    fit.predict(s)
                }
            };
            // Every row is rounded, not just the filled cells.
            values.push(value.round() as i64);
        }

        let filled = Series::new(rule.target.as_str().into(), values);
        df.replace(&rule.target, filled)?;

        info!(
            "Filled {} missing '{}' values from '{}'",
            rows_filled, rule.target, rule.source
        );

        Ok(ImputationOutcome {
            source: rule.source.clone(),
            target: rule.target.clone(),
            nulls_before,
            rows_filled,
            fit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;

    fn cleaner() -> DataCleaner {
        DataCleaner::new(&PipelineConfig::default())
    }

    fn rating_metascore_df() -> DataFrame {
        // Metascore = 10 * Rating exactly on the complete rows.
        df![
            "Rating" => [6.0, 7.0, 8.0, 7.2, 9.0],
            "Metascore" => [Some(60.0), Some(70.0), Some(80.0), None, Some(90.0)],
            "Votes" => [100i64, 200, 300, 400, 500],
            "Revenue_(Millions)" => [Some(10.0), Some(20.0), Some(30.0), Some(40.0), None],
        ]
        .unwrap()
    }

    #[test]
    fn test_rename_applies_map() {
        let df = df![
            "Runtime (Minutes)" => [100i64, 120],
            "Revenue (Millions)" => [1.0, 2.0],
            "Rating" => [7.0, 8.0],
            "Metascore" => [70.0, 80.0],
            "Votes" => [10i64, 20],
        ]
        .unwrap();

        let (cleaned, report) = cleaner().clean(df).unwrap();
        assert!(cleaned.column("Runtime_(Minutes)").is_ok());
        assert!(cleaned.column("Revenue_(Millions)").is_ok());
        assert!(cleaned.column("Runtime (Minutes)").is_err());
        assert_eq!(report.rename_actions.len(), 2);
    }

    #[test]
    fn test_rename_is_idempotent() {
        let df = rating_metascore_df();

        let (once, first) = cleaner().clean(df).unwrap();
        let (twice, second) = cleaner().clean(once.clone()).unwrap();

        // Already-normalized names produce no rename actions and no changes.
        assert!(second.rename_actions.is_empty());
        assert!(first.rename_actions.is_empty());
        assert_eq!(once.get_column_names(), twice.get_column_names());
    }

    #[test]
    fn test_imputed_columns_are_non_null_integers() {
        let (cleaned, _) = cleaner().clean(rating_metascore_df()).unwrap();

        let metascore = cleaned.column("Metascore").unwrap();
        let revenue = cleaned.column("Revenue_(Millions)").unwrap();
        assert_eq!(metascore.null_count(), 0);
        assert_eq!(revenue.null_count(), 0);
        assert_eq!(metascore.dtype(), &DataType::Int64);
        assert_eq!(revenue.dtype(), &DataType::Int64);
    }

    #[test]
    fn test_fill_uses_single_fit_over_complete_rows() {
        let (cleaned, report) = cleaner().clean(rating_metascore_df()).unwrap();

        // The complete rows lie exactly on Metascore = 10 * Rating.
        let fit = report.imputations[0].fit;
        assert!((fit.slope - 10.0).abs() < 1e-9);
        assert!(fit.intercept.abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(report.imputations[0].nulls_before, 1);
        assert_eq!(report.imputations[0].rows_filled, 1);

        // Rating 7.2 -> 72
        let metascore = cleaned.column("Metascore").unwrap();
        let filled = metascore.get(3).unwrap().try_extract::<i64>().unwrap();
        assert_eq!(filled, 72);
    }

    #[test]
    fn test_whole_column_is_rounded() {
        let df = df![
            "Rating" => [6.0, 7.0, 8.0],
            "Metascore" => [60.4, 70.6, 80.0],
            "Votes" => [100i64, 200, 300],
            "Revenue_(Millions)" => [10.0, 20.0, 30.0],
        ]
        .unwrap();

        let (cleaned, _) = cleaner().clean(df).unwrap();
        let metascore = cleaned.column("Metascore").unwrap();
        assert_eq!(metascore.get(0).unwrap().try_extract::<i64>().unwrap(), 60);
        assert_eq!(metascore.get(1).unwrap().try_extract::<i64>().unwrap(), 71);
    }

    #[test]
    fn test_refit_after_imputation_differs() {
        // Exact line on complete rows; the filled value rounds off the line,
        // so refitting over the cleaned table yields a lower R².
        let df = df![
            "Rating" => [1.0, 2.0, 3.0, 2.2],
            "Metascore" => [Some(3.0), Some(5.0), Some(7.0), None],
            "Votes" => [1i64, 2, 3, 4],
            "Revenue_(Millions)" => [1.0, 2.0, 3.0, 4.0],
        ]
        .unwrap();

        let (cleaned, report) = cleaner().clean(df).unwrap();
        let fit_r2 = report.imputations[0].fit.r_squared;
        assert!((fit_r2 - 1.0).abs() < 1e-9);

        let (xs, ys) = paired_complete(&cleaned, "Rating", "Metascore").unwrap();
        let refit = regression::linear_fit(&xs, &ys).unwrap();
        assert!(refit.r_squared < fit_r2);
    }

    #[test]
    fn test_clean_is_deterministic() {
        let (a, ra) = cleaner().clean(rating_metascore_df()).unwrap();
        let (b, rb) = cleaner().clean(rating_metascore_df()).unwrap();

        assert_eq!(ra.imputations[0].fit, rb.imputations[0].fit);
        assert_eq!(ra.imputations[1].fit, rb.imputations[1].fit);
        assert!(a.equals(&b));
    }

    #[test]
    fn test_missing_source_column_fails() {
        let df = df![
            "Metascore" => [Some(60.0), None],
            "Votes" => [1i64, 2],
            "Revenue_(Millions)" => [1.0, 2.0],
        ]
        .unwrap();

        let err = cleaner().clean(df).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_too_few_complete_rows_fails() {
        let df = df![
            "Rating" => [7.0, 8.0],
            "Metascore" => [Some(70.0), None],
            "Votes" => [1i64, 2],
            "Revenue_(Millions)" => [1.0, 2.0],
        ]
        .unwrap();

        let err = cleaner().clean(df).unwrap_err();
        assert_eq!(err.error_code(), "FIT_FAILED");
    }
}
