//! Result readers and report writers behind the `qarep` CLI.

pub mod backend_report;
pub mod consolidated;
pub mod csv;
pub mod discover;
pub mod frontend_report;
pub mod jtl;
pub mod junit;
pub mod karma;
pub mod load_report;
pub mod report_io;
pub mod test_case;
pub mod thresholds;
pub mod thresholds_eval;

pub use thresholds::ThresholdSet;
pub use thresholds_eval::{ThresholdCheck, ThresholdWarning, validate_thresholds};
