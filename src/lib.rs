//! Movie Dataset Analysis Pipeline
//!
//! An exploratory-analysis pipeline for the IMDB movie dataset built with
//! Rust and Polars.
//!
//! # Overview
//!
//! The pipeline runs a fixed sequence of stages over a CSV table:
//!
//! - **Loading**: CSV ingestion with schema inference
//! - **Profiling**: Per-column types, missing values, statistics and
//!   pairwise correlations, rendered as a self-contained HTML report
//! - **Cleaning**: Column renaming and regression-based imputation of
//!   missing Metascore and Revenue values
//! - **Analysis**: A fixed set of descriptive questions (top-rated title,
//!   per-year counts, director filters, actor and genre frequencies)
//! - **Visualization**: Scatter plots with best-fit overlays and pairplot
//!   matrices before and after cleaning
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cinestat::{load_csv, Pipeline, PipelineConfig};
//!
//! let df = load_csv("movie_dataset.csv")?;
//!
//! let config = PipelineConfig::builder()
//!     .output_dir("outputs")
//!     .build()?;
//!
//! let result = Pipeline::new(config)?.run(df)?;
//!
//! println!("Top rated: {}", result.analysis.top_rated_title);
//! for imputation in &result.cleaning.imputations {
//!     println!(
//!         "Filled {} rows of {} (R² = {:.2})",
//!         imputation.rows_filled, imputation.target, imputation.fit.r_squared
//!     );
//! }
//! ```
//!
//! Individual stages are usable on their own: [`DataProfiler`] and
//! [`Analyzer`] never mutate the table, [`DataCleaner`] consumes and
//! returns it.

pub mod analyzer;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;
pub mod visualizer;

pub use analyzer::Analyzer;
pub use cleaner::DataCleaner;
pub use config::{ConfigValidationError, ImputationRule, PipelineConfig, PipelineConfigBuilder};
pub use error::{AnalysisError, Result, ResultExt};
pub use loader::load_csv;
pub use pipeline::Pipeline;
pub use profiler::DataProfiler;
pub use reporting::ReportGenerator;
pub use types::{
    AnalysisReport, CleaningReport, DatasetProfile, ImputationOutcome, LinearFit, PipelineResult,
    PlotArtifact,
};
pub use visualizer::Visualizer;
