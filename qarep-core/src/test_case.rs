#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Failed,
    Error,
    Skipped,
}

/// One executed test. `group` is the JUnit class or the browser-test suite.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub group: String,
    pub name: String,
    pub status: TestStatus,
    /// Seconds for JUnit cases, milliseconds for browser-test specs.
    pub time: f64,
}
