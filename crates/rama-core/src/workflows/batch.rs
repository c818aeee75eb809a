use super::analyze::{self, AngleKind};
use crate::core::models::angles::DatasetAngleRecord;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const STRUCTURE_EXTENSION: &str = "pdb";

#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: AnalysisError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Backbone records of every successful file, in file-name order.
    pub records: Vec<DatasetAngleRecord>,
    pub failures: Vec<BatchFailure>,
    pub files_processed: usize,
}

/// Lists the `.pdb` files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`AnalysisError::FileAccess`] if the directory cannot be listed.
pub fn discover_structures(dir: &Path) -> Result<Vec<PathBuf>, AnalysisError> {
    let access_error = |source| AnalysisError::FileAccess {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(access_error)? {
        let path = entry.map_err(access_error)?.path();
        let is_structure = path
            .extension()
            .is_some_and(|ext| ext == STRUCTURE_EXTENSION);
        if is_structure && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Computes backbone angles for every structure file in `dir`.
///
/// A file that fails to parse is recorded in [`BatchReport::failures`] and
/// the remaining files are still processed.
///
/// # Errors
///
/// Fails only if the directory itself cannot be listed.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn run(
    dir: &Path,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<BatchReport, AnalysisError> {
    let files = discover_structures(dir)?;
    info!(files = files.len(), "Starting batch analysis.");

    reporter.report(Progress::PhaseStart {
        name: "Batch analysis",
    });
    reporter.report(Progress::TaskStart {
        total_steps: files.len() as u64,
    });

    #[cfg(feature = "parallel")]
    let results: Vec<_> = if config.parallel {
        files.par_iter().map(|path| analyze_one(path, config, reporter)).collect()
    } else {
        files.iter().map(|path| analyze_one(path, config, reporter)).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = files.iter().map(|path| analyze_one(path, config, reporter)).collect();

    reporter.report(Progress::TaskFinish);

    let mut report = BatchReport {
        files_processed: files.len(),
        ..BatchReport::default()
    };
    for (path, result) in results {
        match result {
            Ok(angles) => {
                let pdb_id = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                report
                    .records
                    .extend(angles.backbone.into_iter().map(|angles| DatasetAngleRecord {
                        pdb_id: pdb_id.clone(),
                        angles,
                    }));
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Skipping structure.");
                reporter.report(Progress::Message(format!(
                    "Skipped {}: {}",
                    path.display(),
                    error
                )));
                report.failures.push(BatchFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    reporter.report(Progress::PhaseFinish);
    info!(
        records = report.records.len(),
        failures = report.failures.len(),
        "Batch analysis complete."
    );
    Ok(report)
}

fn analyze_one<'p>(
    path: &'p PathBuf,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> (&'p PathBuf, Result<analyze::StructureAngles, AnalysisError>) {
    let result = analyze::run(path, config, &[AngleKind::Backbone]);
    reporter.report(Progress::TaskIncrement);
    (path, result)
}
