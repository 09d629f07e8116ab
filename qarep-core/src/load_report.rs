//! CSV summary for a load-test run.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use qarep_metrics::LoadMetrics;

use crate::csv::CsvWriter;
use crate::report_io::{self, Result};

pub const METRIC_HEADER: [&str; 2] = ["Metric", "Value"];
pub const ENDPOINT_SECTION: &str = "Endpoint Statistics";
pub const ENDPOINT_HEADER: [&str; 8] = [
    "Endpoint",
    "Total Requests",
    "Successful",
    "Errors",
    "Error %",
    "Avg Time (ms)",
    "Min Time (ms)",
    "Max Time (ms)",
];

pub const TOTAL_REQUESTS: &str = "Total Requests";
pub const SUCCESSFUL_REQUESTS: &str = "Successful Requests";
pub const FAILED_REQUESTS: &str = "Failed Requests";
pub const TOTAL_BYTES: &str = "Total Bytes";

pub fn report_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("load_test_summary_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

pub fn render(metrics: &LoadMetrics) -> String {
    let mut w = CsvWriter::new();

    w.row(METRIC_HEADER);
    let global: [(&str, String); 11] = [
        (TOTAL_REQUESTS, metrics.total_requests.to_string()),
        (SUCCESSFUL_REQUESTS, metrics.success_count.to_string()),
        (FAILED_REQUESTS, metrics.error_count.to_string()),
        ("Error Percentage (%)", fmt2(metrics.error_percentage)),
        ("Average Response Time (ms)", fmt2(metrics.avg_response_time)),
        ("Min Response Time (ms)", fmt2(metrics.min_response_time)),
        ("Max Response Time (ms)", fmt2(metrics.max_response_time)),
        ("Median Response Time (ms)", fmt2(metrics.median_response_time)),
        ("95th Percentile (ms)", fmt2(metrics.p95_response_time)),
        ("99th Percentile (ms)", fmt2(metrics.p99_response_time)),
        (TOTAL_BYTES, metrics.total_bytes.to_string()),
    ];
    for (name, value) in &global {
        w.row([*name, value.as_str()]);
    }

    w.blank();
    w.row([ENDPOINT_SECTION]);
    w.row(ENDPOINT_HEADER);

    for (label, s) in &metrics.endpoints {
        w.row([
            label.clone(),
            s.count.to_string(),
            s.success.to_string(),
            s.error.to_string(),
            fmt2(s.error_percentage()),
            fmt2(s.avg_time()),
            fmt2(s.min_time),
            fmt2(s.max_time),
        ]);
    }

    w.finish()
}

/// Writes the report, creating missing parent directories first.
pub fn write_report(metrics: &LoadMetrics, path: &Path) -> Result<()> {
    report_io::write(path, render(metrics))
}

/// Reads back the key/value block at the top of a written report.
pub fn read_metrics_table(path: &Path) -> Result<BTreeMap<String, String>> {
    let table = report_io::read_table(path)?;

    // The first row is the `Metric,Value` header. Blank separator lines are
    // dropped by the parser, so the block ends at the endpoint section title.
    Ok(table
        .rows
        .into_iter()
        .take_while(|row| row.first().map(String::as_str) != Some(ENDPOINT_SECTION))
        .filter_map(|row| {
            let mut it = row.into_iter();
            Some((it.next()?, it.next()?))
        })
        .collect())
}

fn fmt2(v: f64) -> String {
    format!("{v:.2}")
}
