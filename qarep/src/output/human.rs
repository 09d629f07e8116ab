use std::io::Write as _;
use std::path::Path;

mod format;
mod summary;

use summary::render;

use super::{LoadTestSummary, OutputFormatter};

pub(crate) struct HumanReadableOutput;

impl OutputFormatter for HumanReadableOutput {
    fn print_header(&self, results: &Path, records: usize) {
        println!("results: {}", results.display());
        println!("records: {records}");
        println!();
    }

    fn print_summary(&self, summary: &LoadTestSummary<'_>) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(render(summary).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
