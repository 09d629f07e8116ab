use std::path::Path;

use qarep_core::ThresholdWarning;
use qarep_metrics::LoadMetrics;

use crate::cli::OutputFormat;

mod human;
mod json;

/// Everything a load-test run reports on stdout.
pub(crate) struct LoadTestSummary<'a> {
    pub metrics: &'a LoadMetrics,
    /// `None` when no thresholds were configured.
    pub warnings: Option<&'a [ThresholdWarning]>,
    pub report: &'a Path,
}

pub(crate) trait OutputFormatter {
    fn print_header(&self, results: &Path, records: usize);
    fn print_summary(&self, summary: &LoadTestSummary<'_>) -> anyhow::Result<()>;
}

pub(crate) fn formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::HumanReadable => Box::new(human::HumanReadableOutput),
        OutputFormat::Json => Box::new(json::JsonOutput),
    }
}
