//! CLI entry point for the movie dataset analysis pipeline.

use anyhow::{anyhow, Result};
use cinestat::{load_csv, Pipeline, PipelineConfig, PipelineResult};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cinestat", version, about = "Exploratory analysis of the IMDB movie dataset")]
struct Args {
    /// Path to the movie dataset CSV file
    #[arg(short, long, default_value = "movie_dataset.csv")]
    input: String,

    /// Output directory for the report and plots
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Skip the HTML profiling report
    #[arg(long)]
    skip_report: bool,

    /// Skip scatter plots and pairplot matrices
    #[arg(long)]
    skip_plots: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the full result as JSON instead of the answer summary
    ///
    /// Disables all progress logs; only the JSON document is written to
    /// stdout. Useful for piping: `... --json | jq .analysis`
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so stdout
/// only contains the JSON document.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !std::path::Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let df = load_csv(&args.input)?;
    info!("Dataset loaded successfully: {:?}", df.shape());

    let config = PipelineConfig::builder()
        .output_dir(&args.output)
        .generate_report(!args.skip_report)
        .generate_plots(!args.skip_plots)
        .build()?;

    let result = Pipeline::new(config)?.run(df)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    Ok(())
}

fn print_summary(result: &PipelineResult) {
    for imputation in &result.cleaning.imputations {
        println!(
            "Straight line function for '{}' from '{}': y = {:.4}x + {:.4} (R-squared: {:.2})",
            imputation.target,
            imputation.source,
            imputation.fit.slope,
            imputation.fit.intercept,
            imputation.fit.r_squared,
        );
    }

    let analysis = &result.analysis;
    println!(
        "The title with the highest rating is: {}",
        analysis.top_rated_title
    );
    println!("The average revenue in million: {}", analysis.mean_revenue);
    println!(
        "The average revenue of movies from 2015 to 2017 is: {}",
        analysis.mean_revenue_2015_2017
    );
    println!(
        "Number of movies released in 2016: {}",
        analysis.movies_in_2016
    );
    println!(
        "The number of movies directed by Christopher Nolan is: {}",
        analysis.nolan_movie_count
    );
    println!(
        "The number of movies that have a rating of at least 8: {}",
        analysis.highly_rated_count
    );
    println!(
        "The median rating of movies directed by Christopher Nolan is: {}",
        analysis.nolan_median_rating
    );
    println!(
        "The year with the highest average rating is: {}",
        analysis.best_year_by_mean_rating
    );
    println!(
        "Percentage increase of movies between 2006 and 2016: {}",
        analysis.movie_count_change_pct
    );
    println!(
        "The most common actor in all movies is: {}",
        analysis.most_frequent_actor
    );
    println!(
        "Amount of Genres in the dataset: {}",
        analysis.distinct_genre_count
    );

    for plot in &result.scatter_plots {
        println!(
            "R-squared value between {} and {}: {:.2}",
            plot.x_column, plot.y_column, plot.r_squared
        );
    }

    if let Some(path) = &result.report_path {
        println!("Profiling report: {}", path.display());
    }
}
