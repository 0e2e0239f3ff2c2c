//! Pipeline orchestration.
//!
//! Wires the stages together in a fixed order: profile the raw table, write
//! the HTML report, render a pairplot of the raw data, clean, answer the
//! descriptive questions, then render the post-cleaning plots. Each stage
//! consumes the output of the previous one; failures abort the run.

use crate::analyzer::Analyzer;
use crate::cleaner::DataCleaner;
use crate::config::PipelineConfig;
use crate::error::{AnalysisError, Result};
use crate::profiler::DataProfiler;
use crate::reporting::ReportGenerator;
use crate::types::PipelineResult;
use crate::visualizer::{Visualizer, SCATTER_PAIRS};
use polars::prelude::*;
use tracing::info;

#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Build a pipeline from a validated configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over `df` and collect the artifacts.
    pub fn run(&self, df: DataFrame) -> Result<PipelineResult> {
        info!(
            "Pipeline started over {} rows x {} columns",
            df.height(),
            df.width()
        );

        let profile = DataProfiler::profile_dataset(&df)?;

        let report_path = if self.config.generate_report {
            let generator = ReportGenerator::new(&self.config.output_dir);
            Some(generator.write_profile_report(&profile, "profiling_report")?)
        } else {
            None
        };

        let visualizer = Visualizer::new(&self.config.output_dir);
        let pairplot_raw = if self.config.generate_plots {
            Some(visualizer.pairplot(&df, "pairplot_raw.png")?)
        } else {
            None
        };

        let cleaner = DataCleaner::new(&self.config);
        let (cleaned, cleaning) = cleaner.clean(df)?;

        let analysis = Analyzer::new(&cleaned).run_all()?;

        let mut scatter_plots = Vec::new();
        let pairplot_clean = if self.config.generate_plots {
            for (x_col, y_col) in SCATTER_PAIRS {
                scatter_plots.push(visualizer.scatter_with_fit(&cleaned, x_col, y_col)?);
            }
            Some(visualizer.pairplot(&cleaned, "pairplot_clean.png")?)
        } else {
            None
        };

        info!("Pipeline finished");
        Ok(PipelineResult {
            profile,
            report_path,
            cleaning,
            analysis,
            scatter_plots,
            pairplot_raw,
            pairplot_clean,
        })
    }
}
