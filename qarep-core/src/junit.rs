//! JUnit-style XML (`surefire-reports/*.xml`).

use std::path::{Path, PathBuf};

use crate::test_case::{TestCase, TestStatus};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("invalid `{attr}` attribute {value:?} on <{element}>")]
    Attribute {
        element: String,
        attr: &'static str,
        value: String,
    },
}

/// Totals and cases for one or more test suites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteResults {
    pub tests: u64,
    pub failures: u64,
    pub errors: u64,
    pub skipped: u64,
    /// Seconds.
    pub time: f64,
    pub cases: Vec<TestCase>,
}

impl SuiteResults {
    pub fn passed(&self) -> u64 {
        self.tests
            .saturating_sub(self.failures)
            .saturating_sub(self.errors)
            .saturating_sub(self.skipped)
    }

    pub fn merge(&mut self, other: SuiteResults) {
        self.tests = self.tests.saturating_add(other.tests);
        self.failures = self.failures.saturating_add(other.failures);
        self.errors = self.errors.saturating_add(other.errors);
        self.skipped = self.skipped.saturating_add(other.skipped);
        self.time += other.time;
        self.cases.extend(other.cases);
    }
}

pub fn parse_file(path: &Path) -> Result<SuiteResults> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text)
}

/// A `<testsuite>` root is read directly and a `<testsuites>` root sums its
/// child suites. Any other root contributes nothing.
pub fn parse_str(text: &str) -> Result<SuiteResults> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();

    match root.tag_name().name() {
        "testsuite" => parse_suite(root),
        "testsuites" => {
            let mut out = SuiteResults::default();
            for suite in root.children().filter(|n| n.has_tag_name("testsuite")) {
                out.merge(parse_suite(suite)?);
            }
            Ok(out)
        }
        other => {
            tracing::debug!(root = other, "ignoring non-junit xml root");
            Ok(SuiteResults::default())
        }
    }
}

fn parse_suite(suite: roxmltree::Node<'_, '_>) -> Result<SuiteResults> {
    let mut out = SuiteResults {
        tests: count_attr(suite, "tests")?,
        failures: count_attr(suite, "failures")?,
        errors: count_attr(suite, "errors")?,
        skipped: count_attr(suite, "skipped")?,
        time: time_attr(suite)?,
        cases: Vec::new(),
    };

    for case in suite.children().filter(|n| n.has_tag_name("testcase")) {
        let has_child = |name: &str| case.children().any(|c| c.has_tag_name(name));
        let status = if has_child("failure") {
            TestStatus::Failed
        } else if has_child("error") {
            TestStatus::Error
        } else if has_child("skipped") {
            TestStatus::Skipped
        } else {
            TestStatus::Passed
        };

        out.cases.push(TestCase {
            group: case.attribute("classname").unwrap_or("Unknown").to_string(),
            name: case.attribute("name").unwrap_or("Unknown").to_string(),
            status,
            time: time_attr(case)?,
        });
    }

    Ok(out)
}

fn count_attr(node: roxmltree::Node<'_, '_>, attr: &'static str) -> Result<u64> {
    let Some(raw) = node.attribute(attr) else {
        return Ok(0);
    };
    raw.trim().parse().map_err(|_| attr_error(node, attr, raw))
}

fn time_attr(node: roxmltree::Node<'_, '_>) -> Result<f64> {
    let Some(raw) = node.attribute("time") else {
        return Ok(0.0);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| attr_error(node, "time", raw))
}

fn attr_error(node: roxmltree::Node<'_, '_>, attr: &'static str, raw: &str) -> Error {
    Error::Attribute {
        element: node.tag_name().name().to_string(),
        attr,
        value: raw.to_string(),
    }
}
