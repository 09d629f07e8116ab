use std::path::{Path, PathBuf};

use crate::csv::CsvWriter;
use crate::discover::find_files_named;
use crate::karma::{self, BrowserResults, Coverage};
use crate::report_io::{self, Result};

pub const SUMMARY_FILE: &str = "frontend_test_report.csv";
pub const COVERAGE_FILE: &str = "frontend_coverage_report.csv";
pub const DETAILS_FILE: &str = "frontend_test_details.csv";

pub const RESULTS_FILE: &str = "karma-results.json";
pub const COVERAGE_SUMMARY_FILE: &str = "coverage-summary.json";

pub const COL_LINES: &str = "Lines (%)";

pub fn default_project_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("frontend"), PathBuf::from("stock-simulator-angular")]
}

#[derive(Debug, Clone, Default)]
pub struct FrontendResults {
    pub results_file: Option<PathBuf>,
    pub results: BrowserResults,
    pub coverage_file: Option<PathBuf>,
    pub coverage: Option<Coverage>,
}

/// First `karma-results.json` directly inside one of `project_dirs`.
pub fn find_results(project_dirs: &[PathBuf]) -> Option<PathBuf> {
    project_dirs
        .iter()
        .map(|d| d.join(RESULTS_FILE))
        .find(|p| p.is_file())
}

/// Coverage summaries under `<dir>/coverage`, in lookup order: the file
/// directly inside each coverage dir first, then recursive matches.
pub fn coverage_candidates(project_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let roots: Vec<PathBuf> = project_dirs
        .iter()
        .map(|d| d.join("coverage"))
        .filter(|d| d.is_dir())
        .collect();

    let mut out: Vec<PathBuf> = roots
        .iter()
        .map(|r| r.join(COVERAGE_SUMMARY_FILE))
        .filter(|p| p.is_file())
        .collect();
    for root in &roots {
        for path in find_files_named(root, COVERAGE_SUMMARY_FILE) {
            if !out.contains(&path) {
                out.push(path);
            }
        }
    }
    out
}

/// First candidate that parses and carries a `total` block.
pub fn find_coverage(project_dirs: &[PathBuf]) -> Option<(PathBuf, Coverage)> {
    coverage_candidates(project_dirs).into_iter().find_map(|path| {
        match karma::parse_coverage_file(&path) {
            Ok(Some(c)) => Some((path, c)),
            Ok(None) => {
                tracing::warn!(path = %path.display(), "coverage summary has no total, skipping");
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "ignoring coverage summary");
                None
            }
        }
    })
}

/// Missing or unreadable inputs degrade to zero totals and no coverage.
pub fn collect(project_dirs: &[PathBuf]) -> FrontendResults {
    let mut out = FrontendResults::default();

    match find_results(project_dirs) {
        Some(path) => {
            match karma::parse_results_file(&path) {
                Ok(r) => out.results = r,
                Err(err) => tracing::error!(error = %err, "ignoring browser test results"),
            }
            out.results_file = Some(path);
        }
        None => tracing::warn!("no {RESULTS_FILE} found"),
    }

    if let Some((path, c)) = find_coverage(project_dirs) {
        out.coverage = Some(c);
        out.coverage_file = Some(path);
    }

    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendReportPaths {
    pub summary: PathBuf,
    pub coverage: Option<PathBuf>,
    pub details: Option<PathBuf>,
}

pub fn render_summary(results: &BrowserResults, date: &str) -> String {
    let mut w = CsvWriter::new();
    w.row(["Date", "Total Tests", "Passed", "Failed", "Skipped"]);
    w.row([
        date.to_string(),
        results.total.to_string(),
        results.passed.to_string(),
        results.failed.to_string(),
        results.skipped.to_string(),
    ]);
    w.finish()
}

pub fn render_coverage(coverage: &Coverage, date: &str) -> String {
    let mut w = CsvWriter::new();
    w.row(["Date", COL_LINES, "Statements (%)", "Functions (%)", "Branches (%)"]);
    w.row([
        date.to_string(),
        format!("{:.2}", coverage.lines),
        format!("{:.2}", coverage.statements),
        format!("{:.2}", coverage.functions),
        format!("{:.2}", coverage.branches),
    ]);
    w.finish()
}

pub fn render_details(results: &BrowserResults) -> String {
    let mut w = CsvWriter::new();
    w.row(["Suite", "Test", "Status", "Time (ms)"]);
    for case in &results.cases {
        w.row([
            case.group.clone(),
            case.name.clone(),
            case.status.to_string(),
            case.time.to_string(),
        ]);
    }
    w.finish()
}

pub fn write_frontend_report(
    frontend: &FrontendResults,
    reports_dir: &Path,
    date: &str,
) -> Result<FrontendReportPaths> {
    report_io::ensure_dir(reports_dir)?;

    let summary = reports_dir.join(SUMMARY_FILE);
    report_io::write(&summary, render_summary(&frontend.results, date))?;

    let coverage = match &frontend.coverage {
        Some(c) => {
            let path = reports_dir.join(COVERAGE_FILE);
            report_io::write(&path, render_coverage(c, date))?;
            Some(path)
        }
        None => None,
    };

    let details = if frontend.results.cases.is_empty() {
        None
    } else {
        let path = reports_dir.join(DETAILS_FILE);
        report_io::write(&path, render_details(&frontend.results))?;
        Some(path)
    };

    Ok(FrontendReportPaths {
        summary,
        coverage,
        details,
    })
}
