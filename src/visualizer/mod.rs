//! Diagnostic plots.
//!
//! Renders scatter plots with best-fit overlays for the five variable pairs
//! of the analysis, plus full pairplot matrices over the numeric columns.
//! Every fit drawn here is recomputed from the table being plotted, which is
//! intentionally distinct from the fit used for imputation.

use crate::cleaner::regression::linear_fit;
use crate::error::{AnalysisError, Result};
use crate::types::{LinearFit, PlotArtifact};
use crate::utils::{is_numeric_dtype, paired_complete};
use plotters::prelude::*;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The variable pairs plotted after cleaning, in render order.
pub const SCATTER_PAIRS: [(&str, &str); 5] = [
    ("Rating", "Metascore"),
    ("Votes", "Revenue_(Millions)"),
    ("Rating", "Rank"),
    ("Rating", "Runtime_(Minutes)"),
    ("Votes", "Runtime_(Minutes)"),
];

const SCATTER_SIZE: (u32, u32) = (800, 600);
const PAIRPLOT_CELL: u32 = 300;

pub struct Visualizer {
    output_dir: PathBuf,
}

impl Visualizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render one scatter plot with its best-fit line and return the
    /// artifact, including the R² of the freshly computed fit.
    pub fn scatter_with_fit(
        &self,
        df: &DataFrame,
        x_col: &str,
        y_col: &str,
    ) -> Result<PlotArtifact> {
        let (xs, ys) = paired_complete(df, x_col, y_col)?;
        let fit = linear_fit(&xs, &ys).ok_or_else(|| AnalysisError::FitFailed {
            source_col: x_col.to_string(),
            target: y_col.to_string(),
            reason: "not enough spread to fit a line for plotting".to_string(),
        })?;

        fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(format!("scatter_{}_{}.png", slug(x_col), slug(y_col)));

        draw_scatter(&path, x_col, y_col, &xs, &ys, &fit)
            .map_err(|e| AnalysisError::Plotting(e.to_string()))?;

        info!(
            "Rendered scatter {:?} ({} vs {}, R² = {:.2})",
            path, y_col, x_col, fit.r_squared
        );

        Ok(PlotArtifact {
            x_column: x_col.to_string(),
            y_column: y_col.to_string(),
            r_squared: fit.r_squared,
            path,
        })
    }

    /// Render a pairplot matrix over all numeric columns: scatter panels
    /// with a best-fit overlay off the diagonal, column names on it.
    pub fn pairplot(&self, df: &DataFrame, filename: &str) -> Result<PathBuf> {
        let columns: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| is_numeric_dtype(c.dtype()))
            .map(|c| c.name().to_string())
            .collect();

        if columns.is_empty() {
            return Err(AnalysisError::Plotting(
                "no numeric columns to pairplot".to_string(),
            ));
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(filename);

        draw_pairplot(&path, df, &columns)
            .map_err(|e| AnalysisError::Plotting(e.to_string()))?;

        info!("Rendered pairplot {:?} over {} columns", path, columns.len());
        Ok(path)
    }
}

fn draw_scatter(
    path: &Path,
    x_col: &str,
    y_col: &str,
    xs: &[f64],
    ys: &[f64],
    fit: &LinearFit,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, SCATTER_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_bounds(xs);
    let (y_min, y_max) = padded_bounds(ys);

    let caption = format!("Correlation between {} and {}", x_col, y_col);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_col)
        .y_desc(y_col)
        .draw()?;

    chart.draw_series(
        xs.iter()
            .zip(ys.iter())
            .map(|(&x, &y)| Circle::new((x, y), 3, BLUE.filled())),
    )?;

    chart
        .draw_series(LineSeries::new(
            vec![(x_min, fit.predict(x_min)), (x_max, fit.predict(x_max))],
            &RED,
        ))?
        .label("Best-fit line")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_pairplot(
    path: &Path,
    df: &DataFrame,
    columns: &[String],
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let n = columns.len();
    let size = PAIRPLOT_CELL * n as u32;
    let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
    root.fill(&WHITE)?;

    let cells = root.split_evenly((n, n));

    for (row, y_col) in columns.iter().enumerate() {
        for (col, x_col) in columns.iter().enumerate() {
            let cell = &cells[row * n + col];

            if row == col {
                let (w, h) = cell.dim_in_pixel();
                cell.draw(&Text::new(
                    y_col.clone(),
                    (w as i32 / 2 - 6 * y_col.len() as i32 / 2, h as i32 / 2),
                    ("sans-serif", 18).into_font(),
                ))?;
                continue;
            }

            let (xs, ys) = paired_complete(df, x_col, y_col)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            if xs.is_empty() {
                continue;
            }

            let (x_min, x_max) = padded_bounds(&xs);
            let (y_min, y_max) = padded_bounds(&ys);

            let mut chart = ChartBuilder::on(cell)
                .margin(8)
                .x_label_area_size(18)
                .y_label_area_size(24)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

            chart.configure_mesh().x_labels(3).y_labels(3).draw()?;

            chart.draw_series(
                xs.iter()
                    .zip(ys.iter())
                    .map(|(&x, &y)| Circle::new((x, y), 2, BLUE.filled())),
            )?;

            // Degenerate panels (e.g. constant columns) get no overlay.
            if let Some(fit) = linear_fit(&xs, &ys) {
                chart.draw_series(LineSeries::new(
                    vec![(x_min, fit.predict(x_min)), (x_max, fit.predict(x_max))],
                    &RED,
                ))?;
            }
        }
    }

    root.present()?;
    Ok(())
}

/// Plot bounds with a 5% margin; degenerate ranges get a unit pad so the
/// coordinate system stays valid.
fn padded_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// File-name-safe version of a column name.
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}
