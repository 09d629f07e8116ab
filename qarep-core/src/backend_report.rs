use std::path::{Path, PathBuf};

use crate::csv::CsvWriter;
use crate::discover::{files_with_extension, first_existing_dir};
use crate::junit::{self, SuiteResults};
use crate::report_io::{self, Result};

pub const SUMMARY_FILE: &str = "backend_test_report.csv";
pub const DETAILS_FILE: &str = "backend_test_details.csv";

pub const COL_DATE: &str = "Date";
pub const COL_TOTAL: &str = "Total Tests";
pub const COL_PASSED: &str = "Passed";
pub const COL_FAILED: &str = "Failed";
pub const COL_ERRORS: &str = "Errors";
pub const COL_SKIPPED: &str = "Skipped";
pub const COL_TIME: &str = "Total Time (s)";

pub fn default_source_dirs() -> Vec<PathBuf> {
    vec![
        Path::new("backend").join("target").join("surefire-reports"),
        Path::new("stock-simulator-spring")
            .join("target")
            .join("surefire-reports"),
    ]
}

/// Outcome of collecting JUnit files.
#[derive(Debug, Clone, Default)]
pub struct BackendResults {
    pub files: Vec<PathBuf>,
    pub results: SuiteResults,
}

/// Parses every `*.xml` in the first existing source directory. Files that
/// fail to parse are logged and skipped.
pub fn collect(source_dirs: &[PathBuf]) -> BackendResults {
    let Some(dir) = first_existing_dir(source_dirs) else {
        return BackendResults::default();
    };

    let files = files_with_extension(dir, "xml");
    let mut results = SuiteResults::default();
    for file in &files {
        match junit::parse_file(file) {
            Ok(r) => results.merge(r),
            Err(err) => {
                tracing::error!(file = %file.display(), error = %err, "skipping junit report");
            }
        }
    }

    BackendResults { files, results }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReportPaths {
    pub summary: PathBuf,
    pub details: Option<PathBuf>,
}

pub fn render_summary(results: &SuiteResults, date: &str) -> String {
    let mut w = CsvWriter::new();
    w.row([
        COL_DATE,
        COL_TOTAL,
        COL_PASSED,
        COL_FAILED,
        COL_ERRORS,
        COL_SKIPPED,
        COL_TIME,
    ]);
    w.row([
        date.to_string(),
        results.tests.to_string(),
        results.passed().to_string(),
        results.failures.to_string(),
        results.errors.to_string(),
        results.skipped.to_string(),
        format!("{:.2}", results.time),
    ]);
    w.finish()
}

pub fn render_details(results: &SuiteResults) -> String {
    let mut w = CsvWriter::new();
    w.row(["Class", "Test", "Status", "Time (s)"]);
    for case in &results.cases {
        w.row([
            case.group.clone(),
            case.name.clone(),
            case.status.to_string(),
            format!("{:.3}", case.time),
        ]);
    }
    w.finish()
}

/// Writes the summary, plus the per-case details when any report file was
/// found.
pub fn write_backend_report(
    backend: &BackendResults,
    reports_dir: &Path,
    date: &str,
) -> Result<BackendReportPaths> {
    report_io::ensure_dir(reports_dir)?;

    let summary = reports_dir.join(SUMMARY_FILE);
    report_io::write(&summary, render_summary(&backend.results, date))?;

    let details = if backend.files.is_empty() {
        tracing::warn!("no junit xml reports found");
        None
    } else {
        let path = reports_dir.join(DETAILS_FILE);
        report_io::write(&path, render_details(&backend.results))?;
        Some(path)
    };

    Ok(BackendReportPaths { summary, details })
}
