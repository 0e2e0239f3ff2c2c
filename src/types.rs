use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Parameters of an ordinary-least-squares straight line fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Fraction of variance explained (squared Pearson coefficient).
    pub r_squared: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    /// Semantic type: "numeric", "token_list" or "text".
    pub inferred_type: String,
    pub null_count: usize,
    pub null_percentage: f64,
    pub unique_count: usize,
    pub sample_values: Vec<String>,
    /// Free-form per-type statistics (mean/std/skewness for numeric columns,
    /// most frequent value for text, distinct token count for lists).
    pub characteristics: HashMap<String, serde_json::Value>,
}

/// Pearson correlation between one pair of numeric columns, computed over
/// rows where both values are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub left: String,
    pub right: String,
    pub pearson_r: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: (usize, usize),
    pub column_profiles: Vec<ColumnProfile>,
    pub correlations: Vec<CorrelationEntry>,
}

/// Outcome of one regression-imputation rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputationOutcome {
    pub source: String,
    pub target: String,
    /// Missing values in the target column before filling.
    pub nulls_before: usize,
    /// Rows actually filled from the fitted line.
    pub rows_filled: usize,
    /// The fit computed once over complete-case rows and applied to every
    /// missing row of the pair.
    pub fit: LinearFit,
}

/// What the cleaning stage did: renames applied and imputations performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Human-readable rename actions, e.g. `Renamed 'Revenue (Millions)' ...`.
    pub rename_actions: Vec<String>,
    pub imputations: Vec<ImputationOutcome>,
}

/// Answers to the fixed descriptive question set, in question order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Title of the row with maximum Rating (first occurrence on ties).
    pub top_rated_title: String,
    /// Mean of Revenue_(Millions) across all rows.
    pub mean_revenue: f64,
    /// Mean of Revenue_(Millions) for 2015 <= Year <= 2017.
    pub mean_revenue_2015_2017: f64,
    /// Row count for Year == 2016.
    pub movies_in_2016: usize,
    /// Row count for Director == "Christopher Nolan".
    pub nolan_movie_count: usize,
    /// Row count for Rating >= 8.0.
    pub highly_rated_count: usize,
    /// Median Rating among Christopher Nolan's movies.
    pub nolan_median_rating: f64,
    /// Year maximizing the mean Rating.
    pub best_year_by_mean_rating: i64,
    /// Percentage change in row count from 2006 to 2016.
    pub movie_count_change_pct: f64,
    /// Most frequent individual actor after comma-splitting Actors.
    pub most_frequent_actor: String,
    /// Number of distinct genre tokens after comma-splitting Genre.
    pub distinct_genre_count: usize,
}

/// One rendered scatter plot and the fit drawn on it.
///
/// The fit here is recomputed over the cleaned (imputed) table and is
/// deliberately distinct from the cleaning-time fit, which only saw
/// complete-case rows; both R² values are surfaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotArtifact {
    pub x_column: String,
    pub y_column: String,
    pub r_squared: f64,
    pub path: PathBuf,
}

/// Everything the pipeline produced in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub profile: DatasetProfile,
    /// Path of the HTML profiling report, when enabled.
    pub report_path: Option<PathBuf>,
    pub cleaning: CleaningReport,
    pub analysis: AnalysisReport,
    pub scatter_plots: Vec<PlotArtifact>,
    /// Pairplot over the raw table, when plots are enabled.
    pub pairplot_raw: Option<PathBuf>,
    /// Pairplot over the cleaned table, when plots are enabled.
    pub pairplot_clean: Option<PathBuf>,
}
