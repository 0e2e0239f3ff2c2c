//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The imputation policy is an explicit, ordered list of column pairs rather
//! than literals scattered through the cleaning code, so the policy can be
//! audited and tested in isolation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single regression-imputation rule: missing `target` values are filled
/// from a straight line fitted against `source`.
///
/// The default rules are the two strongest pairwise correlations in the
/// movie dataset (Rating→Metascore, Votes→Revenue). This is a one-off policy
/// for this dataset, not a generic imputation strategy: pairs without a
/// strong correlation are never imputed this way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImputationRule {
    /// Column the fitted line is evaluated over.
    pub source: String,
    /// Column whose missing values are filled.
    pub target: String,
}

impl ImputationRule {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Configuration for the analysis pipeline.
///
/// Use [`PipelineConfig::builder()`] for fluent construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Column rename map applied before any name-based access.
    /// Entries whose old name is absent are skipped, which makes the
    /// renaming step idempotent.
    pub rename_map: Vec<(String, String)>,

    /// Ordered list of regression-imputation rules.
    pub imputation_rules: Vec<ImputationRule>,

    /// Output directory for the HTML report and rendered plots.
    /// Default: "outputs"
    pub output_dir: PathBuf,

    /// Whether to write the HTML profiling report.
    /// Default: true
    pub generate_report: bool,

    /// Whether to render scatter plots and pairplot matrices.
    /// Default: true
    pub generate_plots: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rename_map: vec![
                ("Runtime (Minutes)".to_string(), "Runtime_(Minutes)".to_string()),
                ("Revenue (Millions)".to_string(), "Revenue_(Millions)".to_string()),
            ],
            imputation_rules: vec![
                ImputationRule::new("Rating", "Metascore"),
                ImputationRule::new("Votes", "Revenue_(Millions)"),
            ],
            output_dir: PathBuf::from("outputs"),
            generate_report: true,
            generate_plots: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for rule in &self.imputation_rules {
            if rule.source.is_empty() || rule.target.is_empty() {
                return Err(ConfigValidationError::EmptyRuleColumn);
            }
            if rule.source == rule.target {
                return Err(ConfigValidationError::SelfReferentialRule(
                    rule.source.clone(),
                ));
            }
        }

        for (old, new) in &self.rename_map {
            if old.is_empty() || new.is_empty() {
                return Err(ConfigValidationError::EmptyRenameEntry);
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Imputation rule has an empty column name")]
    EmptyRuleColumn,

    #[error("Imputation rule for '{0}' uses the same column as source and target")]
    SelfReferentialRule(String),

    #[error("Rename map has an empty entry")]
    EmptyRenameEntry,
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    rename_map: Option<Vec<(String, String)>>,
    imputation_rules: Option<Vec<ImputationRule>>,
    output_dir: Option<PathBuf>,
    generate_report: Option<bool>,
    generate_plots: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Replace the column rename map.
    pub fn rename_map(mut self, map: Vec<(String, String)>) -> Self {
        self.rename_map = Some(map);
        self
    }

    /// Replace the ordered imputation rule list.
    pub fn imputation_rules(mut self, rules: Vec<ImputationRule>) -> Self {
        self.imputation_rules = Some(rules);
        self
    }

    /// Set the output directory for reports and plots.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Enable or disable the HTML profiling report.
    pub fn generate_report(mut self, generate: bool) -> Self {
        self.generate_report = Some(generate);
        self
    }

    /// Enable or disable plot rendering.
    pub fn generate_plots(mut self, generate: bool) -> Self {
        self.generate_plots = Some(generate);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            rename_map: self.rename_map.unwrap_or(defaults.rename_map),
            imputation_rules: self.imputation_rules.unwrap_or(defaults.imputation_rules),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            generate_report: self.generate_report.unwrap_or(true),
            generate_plots: self.generate_plots.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
