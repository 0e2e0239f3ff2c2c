//! Report generation.
//!
//! Writes the diagnostic HTML profiling report to disk. The report is purely
//! informative: nothing downstream reads it back.

mod html;

use crate::error::Result;
use crate::types::DatasetProfile;
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render the profiling report and write it as `<stem>.html` in the
    /// output directory, returning the path written.
    pub fn write_profile_report(
        &self,
        profile: &DatasetProfile,
        stem: &str,
    ) -> Result<PathBuf> {
        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let document = html::render_profile_report(profile, &generated_at);

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{stem}.html"));
        fs::write(&path, document)?;

        info!("Profiling report written to {:?}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::DataProfiler;
    use polars::prelude::*;

    #[test]
    fn test_write_profile_report() {
        let df = df![
            "Rating" => [7.0, 8.0, 9.0],
            "Metascore" => [Some(70.0), None, Some(90.0)],
        ]
        .unwrap();
        let profile = DataProfiler::profile_dataset(&df).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let generator = ReportGenerator::new(dir.path());
        let path = generator
            .write_profile_report(&profile, "profiling_report")
            .unwrap();

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Profiling Report"));
        assert!(contents.contains("Metascore"));
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let df = df!["Rating" => [7.0, 8.0]].unwrap();
        let profile = DataProfiler::profile_dataset(&df).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep/out");
        let generator = ReportGenerator::new(&nested);
        let path = generator.write_profile_report(&profile, "report").unwrap();
        assert!(path.exists());
    }
}
