#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// The result file yielded no usable records.
    NoResults = 20,

    /// Invalid CLI/config/options (bad flags, missing explicit config file, etc.).
    InvalidInput = 30,

    /// Internal/runtime error (unwritable report directory, IO errors).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
