use anyhow::Context as _;
use std::path::{Path, PathBuf};

use qarep_core::{ThresholdSet, jtl, load_report, validate_thresholds};
use qarep_metrics::calculate_metrics;

use crate::cli::LoadTestArgs;
use crate::exit_codes::ExitCode;
use crate::output::{self, LoadTestSummary};
use crate::run_error::RunError;

pub const DEFAULT_CONFIG_FILE: &str = "load-test-config.properties";

pub fn run(args: LoadTestArgs) -> Result<ExitCode, RunError> {
    let out = output::formatter(args.output);
    let thresholds = load_thresholds(&args)?;

    let records = jtl::load_results(&args.results);
    out.print_header(&args.results, records.len());

    let metrics = calculate_metrics(&records);
    if metrics.is_empty() {
        eprintln!("no usable records in {}", args.results.display());
        return Ok(ExitCode::NoResults);
    }
    tracing::info!(
        records = metrics.total_requests,
        skipped = metrics.skipped_records,
        endpoints = metrics.endpoints.len(),
        "metrics computed"
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| results_dir(&args.results).to_path_buf());
    let report = output_dir.join(load_report::report_file_name(&chrono::Local::now()));
    load_report::write_report(&metrics, &report)
        .context("write load-test summary")
        .map_err(RunError::RuntimeError)?;

    let warnings = thresholds
        .filter(|t| !t.is_empty())
        .map(|t| validate_thresholds(&metrics, &t));

    out.print_summary(&LoadTestSummary {
        metrics: &metrics,
        warnings: warnings.as_deref(),
        report: &report,
    })
    .map_err(RunError::RuntimeError)?;

    Ok(ExitCode::Success)
}

/// Directory holding the result file; empty for a bare file name.
fn results_dir(results: &Path) -> &Path {
    results.parent().unwrap_or(Path::new(""))
}

pub fn default_config_path(results: &Path) -> PathBuf {
    results_dir(results).join("..").join(DEFAULT_CONFIG_FILE)
}

/// The default config file is optional; an explicitly named one must exist.
fn load_thresholds(args: &LoadTestArgs) -> Result<Option<ThresholdSet>, RunError> {
    let (path, explicit) = match &args.config {
        Some(p) => (p.clone(), true),
        None => (default_config_path(&args.results), false),
    };

    match ThresholdSet::load(&path) {
        Ok(Some(set)) => {
            tracing::debug!(path = %path.display(), limits = set.len(), "thresholds loaded");
            Ok(Some(set))
        }
        Ok(None) if explicit => Err(RunError::InvalidInput(anyhow::anyhow!(
            "threshold config not found: {}",
            path.display()
        ))),
        Ok(None) => Ok(None),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring threshold config");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_sits_next_to_the_results_directory() {
        assert_eq!(
            default_config_path(Path::new("jmeter/results/run.jtl")),
            PathBuf::from("jmeter/results/../load-test-config.properties")
        );
        assert_eq!(
            default_config_path(Path::new("run.jtl")),
            PathBuf::from("../load-test-config.properties")
        );
    }
}
