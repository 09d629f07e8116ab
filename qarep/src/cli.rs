use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    HumanReadable,
    /// Emit a single JSON summary line to stdout.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "qarep",
    author,
    version,
    about = "Summarise CI test and load-test artifacts into CSV reports",
    long_about = "qarep turns the raw artifacts of a CI run into CSV summaries.\n\nLoad-generator result files become a metrics report with percentiles, per-endpoint statistics and threshold warnings. JUnit XML and browser-test JSON become backend and frontend summaries, which can then be rolled up into one consolidated report.\n\nDiagnostics are written to stderr; set QAREP_LOG (e.g. QAREP_LOG=debug) to change verbosity.",
    after_help = "Examples:\n  qarep load-test jmeter/results/results.jtl\n  qarep load-test results.jtl reports/ --output json\n  qarep backend --source-dir backend/target/surefire-reports\n  qarep frontend --project-dir frontend\n  qarep consolidated --reports-dir test-reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarise a load-generator result file
    #[command(
        long_about = "Read a delimited result file (label, elapsed, success, bytes columns), compute aggregate and per-endpoint metrics, write them as CSV and check them against the configured thresholds.\n\nThreshold warnings are reported but do not change the exit code."
    )]
    LoadTest(LoadTestArgs),

    /// Summarise JUnit XML reports
    Backend(BackendArgs),

    /// Summarise browser-test results and coverage
    Frontend(FrontendArgs),

    /// Roll the backend and frontend summaries into one report
    Consolidated(ConsolidatedArgs),
}

#[derive(Debug, Args)]
pub struct LoadTestArgs {
    /// Path to the result file (.jtl)
    pub results: PathBuf,

    /// Directory for the summary CSV (defaults to the result file's directory)
    pub output_dir: Option<PathBuf>,

    /// Threshold properties file (defaults to ../load-test-config.properties
    /// relative to the result file's directory)
    #[arg(long, env = "QAREP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::HumanReadable)]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ReportsDirArg {
    /// Root directory for generated reports
    #[arg(
        long,
        env = "QAREP_REPORTS_DIR",
        value_name = "DIR",
        default_value = "test-reports"
    )]
    pub reports_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct BackendArgs {
    /// Directory holding JUnit XML files; the first existing one is used
    /// (repeatable, defaults to the usual surefire locations)
    #[arg(long = "source-dir", value_name = "DIR")]
    pub source_dirs: Vec<PathBuf>,

    #[command(flatten)]
    pub reports: ReportsDirArg,
}

#[derive(Debug, Args)]
pub struct FrontendArgs {
    /// Frontend project directory (repeatable, searched in order)
    #[arg(long = "project-dir", value_name = "DIR")]
    pub project_dirs: Vec<PathBuf>,

    #[command(flatten)]
    pub reports: ReportsDirArg,
}

#[derive(Debug, Args)]
pub struct ConsolidatedArgs {
    #[command(flatten)]
    pub reports: ReportsDirArg,
}
