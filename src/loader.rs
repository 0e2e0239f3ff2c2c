//! CSV loading.
//!
//! One comma-delimited UTF-8 file with a header row goes in, one DataFrame
//! comes out. Missing files and malformed content propagate as errors; there
//! is no fallback parsing.

use crate::error::Result;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Read a CSV file into a DataFrame.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()?;

    info!("Loaded {:?}: {} rows x {} columns", path, df.height(), df.width());
    Ok(df)
}
