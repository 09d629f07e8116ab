use serde::Serialize;
use std::io::Write as _;
use std::path::Path;

use super::{LoadTestSummary, OutputFormatter};

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn print_header(&self, _results: &Path, _records: usize) {}

    fn print_summary(&self, summary: &LoadTestSummary<'_>) -> anyhow::Result<()> {
        let line = build_summary_line(summary);
        emit_json_line(&line)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonSummaryLine {
    pub kind: &'static str,

    pub total_requests: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub error_percentage: f64,
    pub skipped_records: u64,
    pub total_bytes: u64,

    pub avg_response_time_ms: f64,
    pub min_response_time_ms: f64,
    pub max_response_time_ms: f64,
    pub median_response_time_ms: f64,
    pub p95_response_time_ms: f64,
    pub p99_response_time_ms: f64,

    pub endpoints: Vec<JsonEndpoint>,

    /// Absent when no thresholds were configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_warnings: Option<Vec<JsonThresholdWarning>>,

    pub report: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonEndpoint {
    pub label: String,
    pub count: u64,
    pub success: u64,
    pub error: u64,
    pub error_percentage: f64,
    pub avg_time_ms: f64,
    pub min_time_ms: f64,
    pub max_time_ms: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonThresholdWarning {
    pub key: &'static str,
    pub observed: f64,
    pub limit: f64,
    pub message: String,
}

fn build_summary_line(summary: &LoadTestSummary<'_>) -> JsonSummaryLine {
    let m = summary.metrics;

    JsonSummaryLine {
        kind: "summary",

        total_requests: m.total_requests,
        success_count: m.success_count,
        error_count: m.error_count,
        error_percentage: m.error_percentage,
        skipped_records: m.skipped_records,
        total_bytes: m.total_bytes,

        avg_response_time_ms: m.avg_response_time,
        min_response_time_ms: m.min_response_time,
        max_response_time_ms: m.max_response_time,
        median_response_time_ms: m.median_response_time,
        p95_response_time_ms: m.p95_response_time,
        p99_response_time_ms: m.p99_response_time,

        endpoints: m
            .endpoints
            .iter()
            .map(|(label, s)| JsonEndpoint {
                label: label.clone(),
                count: s.count,
                success: s.success,
                error: s.error,
                error_percentage: s.error_percentage(),
                avg_time_ms: s.avg_time(),
                min_time_ms: s.min_time,
                max_time_ms: s.max_time,
            })
            .collect(),

        threshold_warnings: summary.warnings.map(|ws| {
            ws.iter()
                .map(|w| JsonThresholdWarning {
                    key: w.check.key(),
                    observed: w.observed,
                    limit: w.limit,
                    message: w.to_string(),
                })
                .collect()
        }),

        report: summary.report.display().to_string(),
    }
}

fn emit_json_line<T: Serialize>(line: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, line)?;
    writeln!(out)?;
    Ok(())
}
