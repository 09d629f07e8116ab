use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "QAREP_LOG";

/// Diagnostics go to stderr so stdout carries only the summary.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
