//! Roll-up of the backend and frontend summaries into a single CSV.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::csv::CsvWriter;
use crate::report_io::{self, Result};
use crate::{backend_report, frontend_report};

pub const REPORT_FILE: &str = "consolidated_test_report.csv";
pub const NOT_APPLICABLE: &str = "N/A";

pub const HEADER: [&str; 10] = [
    "Date",
    "Component",
    "Total Tests",
    "Passed",
    "Failed",
    "Errors",
    "Skipped",
    "Time (s)",
    "Line Coverage (%)",
    "Status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
pub enum Status {
    #[strum(serialize = "PASS")]
    Pass,
    #[strum(serialize = "FAIL")]
    Fail,
    #[strum(serialize = "NOT RUN")]
    NotRun,
}

impl Status {
    fn from_failures(failures: u64) -> Self {
        if failures == 0 { Self::Pass } else { Self::Fail }
    }
}

/// First data row of a component summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSummary {
    pub date: Option<String>,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub errors: u64,
    pub skipped: u64,
    pub time: Option<String>,
}

impl ComponentSummary {
    fn from_row(row: &BTreeMap<String, String>) -> Self {
        let count = |col: &str| -> u64 {
            let Some(raw) = row.get(col) else { return 0 };
            raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(column = col, value = %raw, "non-numeric count, using 0");
                0
            })
        };

        Self {
            date: row.get(backend_report::COL_DATE).cloned(),
            total: count(backend_report::COL_TOTAL),
            passed: count(backend_report::COL_PASSED),
            failed: count(backend_report::COL_FAILED),
            errors: count(backend_report::COL_ERRORS),
            skipped: count(backend_report::COL_SKIPPED),
            time: row.get(backend_report::COL_TIME).cloned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    pub backend: Option<ComponentSummary>,
    pub frontend: Option<ComponentSummary>,
    pub line_coverage: Option<String>,
}

pub fn backend_summary_path(reports_dir: &Path) -> PathBuf {
    reports_dir.join("backend").join(backend_report::SUMMARY_FILE)
}

pub fn frontend_summary_path(reports_dir: &Path) -> PathBuf {
    reports_dir.join("frontend").join(frontend_report::SUMMARY_FILE)
}

pub fn frontend_coverage_path(reports_dir: &Path) -> PathBuf {
    reports_dir.join("frontend").join(frontend_report::COVERAGE_FILE)
}

/// Missing or unreadable summaries count as "not run".
pub fn read_inputs(reports_dir: &Path) -> Inputs {
    let backend = first_row(&backend_summary_path(reports_dir));
    let frontend = first_row(&frontend_summary_path(reports_dir));
    let coverage = first_row(&frontend_coverage_path(reports_dir));

    Inputs {
        backend: backend.as_ref().map(ComponentSummary::from_row),
        frontend: frontend.as_ref().map(ComponentSummary::from_row),
        line_coverage: coverage.and_then(|mut row| row.remove(frontend_report::COL_LINES)),
    }
}

fn first_row(path: &Path) -> Option<BTreeMap<String, String>> {
    if !path.is_file() {
        return None;
    }
    match report_io::read_table(path) {
        Ok(table) => table.first_row_map(),
        Err(err) => {
            tracing::error!(error = %err, "ignoring summary");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: String,
    pub component: &'static str,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub errors: u64,
    pub skipped: u64,
    pub time: String,
    pub line_coverage: String,
    pub status: Status,
}

impl Row {
    fn not_run(component: &'static str, now: &str, time: &str) -> Self {
        Self {
            date: now.to_string(),
            component,
            total: 0,
            passed: 0,
            failed: 0,
            errors: 0,
            skipped: 0,
            time: time.to_string(),
            line_coverage: NOT_APPLICABLE.to_string(),
            status: Status::NotRun,
        }
    }
}

pub fn build_rows(inputs: &Inputs, now: &str) -> Vec<Row> {
    let coverage = inputs
        .line_coverage
        .clone()
        .unwrap_or_else(|| NOT_APPLICABLE.to_string());
    let mut rows = Vec::with_capacity(3);

    rows.push(match &inputs.backend {
        Some(b) => Row {
            date: b.date.clone().unwrap_or_else(|| now.to_string()),
            component: "Backend",
            total: b.total,
            passed: b.passed,
            failed: b.failed,
            errors: b.errors,
            skipped: b.skipped,
            time: b.time.clone().unwrap_or_else(|| "0".to_string()),
            line_coverage: NOT_APPLICABLE.to_string(),
            status: Status::from_failures(b.failed.saturating_add(b.errors)),
        },
        None => Row::not_run("Backend", now, "0.0"),
    });

    // Browser runs report no errors or wall time.
    rows.push(match &inputs.frontend {
        Some(f) => Row {
            date: f.date.clone().unwrap_or_else(|| now.to_string()),
            component: "Frontend",
            total: f.total,
            passed: f.passed,
            failed: f.failed,
            errors: 0,
            skipped: f.skipped,
            time: NOT_APPLICABLE.to_string(),
            line_coverage: coverage.clone(),
            status: Status::from_failures(f.failed),
        },
        None => Row::not_run("Frontend", now, NOT_APPLICABLE),
    });

    if let (Some(b), Some(f)) = (&inputs.backend, &inputs.frontend) {
        let failed = b.failed.saturating_add(b.errors).saturating_add(f.failed);
        rows.push(Row {
            date: now.to_string(),
            component: "TOTAL",
            total: b.total.saturating_add(f.total),
            passed: b.passed.saturating_add(f.passed),
            failed,
            errors: 0,
            skipped: 0,
            time: NOT_APPLICABLE.to_string(),
            line_coverage: coverage,
            status: Status::from_failures(failed),
        });
    }

    rows
}

pub fn render(rows: &[Row]) -> String {
    let mut w = CsvWriter::new();
    w.row(HEADER);
    for r in rows {
        w.row([
            r.date.clone(),
            r.component.to_string(),
            r.total.to_string(),
            r.passed.to_string(),
            r.failed.to_string(),
            r.errors.to_string(),
            r.skipped.to_string(),
            r.time.clone(),
            r.line_coverage.clone(),
            r.status.to_string(),
        ]);
    }
    w.finish()
}

#[derive(Debug, Clone)]
pub struct ConsolidatedReport {
    pub path: PathBuf,
    pub inputs: Inputs,
    pub rows: Vec<Row>,
}

pub fn write_consolidated_report(reports_dir: &Path, now: &str) -> Result<ConsolidatedReport> {
    let inputs = read_inputs(reports_dir);
    let rows = build_rows(&inputs, now);

    let path = reports_dir.join(REPORT_FILE);
    report_io::write(&path, render(&rows))?;

    Ok(ConsolidatedReport { path, inputs, rows })
}
