//! Browser-test results (`karma-results.json`) and the istanbul-style
//! `coverage-summary.json`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

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

    #[error("invalid json in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResultsFile {
    browsers: Vec<Browser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Browser {
    last_result: Option<LastResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LastResult {
    success: u64,
    failed: u64,
    skipped: u64,
    total: u64,
    suites: Vec<Suite>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Suite {
    description: Option<String>,
    specs: Vec<Spec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Spec {
    description: Option<String>,
    success: bool,
    skipped: bool,
    duration: f64,
}

/// Totals summed across browsers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserResults {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    /// Spec durations are in milliseconds.
    pub cases: Vec<TestCase>,
}

pub fn parse_results_str(text: &str) -> serde_json::Result<BrowserResults> {
    let file: ResultsFile = serde_json::from_str(text)?;
    let mut out = BrowserResults::default();

    for last in file.browsers.into_iter().filter_map(|b| b.last_result) {
        out.total = out.total.saturating_add(last.total);
        out.passed = out.passed.saturating_add(last.success);
        out.failed = out.failed.saturating_add(last.failed);
        out.skipped = out.skipped.saturating_add(last.skipped);

        for suite in last.suites {
            let group = suite.description.unwrap_or_else(|| "Unknown".to_string());
            for spec in suite.specs {
                let status = if spec.skipped {
                    TestStatus::Skipped
                } else if spec.success {
                    TestStatus::Passed
                } else {
                    TestStatus::Failed
                };
                out.cases.push(TestCase {
                    group: group.clone(),
                    name: spec.description.unwrap_or_else(|| "Unknown".to_string()),
                    status,
                    time: spec.duration,
                });
            }
        }
    }

    Ok(out)
}

pub fn parse_results_file(path: &Path) -> Result<BrowserResults> {
    let text = read(path)?;
    parse_results_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// `pct` values from the `total` block of a coverage summary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coverage {
    pub lines: f64,
    pub statements: f64,
    pub functions: f64,
    pub branches: f64,
}

#[derive(Debug, Deserialize)]
struct CoverageFile {
    total: Option<CoverageTotals>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CoverageTotals {
    lines: Pct,
    statements: Pct,
    functions: Pct,
    branches: Pct,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Pct {
    // istanbul writes "Unknown" when nothing was instrumented.
    #[serde(deserialize_with = "lenient_pct")]
    pct: f64,
}

fn lenient_pct<'de, D>(de: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    Ok(v.as_f64().unwrap_or(0.0))
}

/// `None` when the summary has no `total` block.
pub fn parse_coverage_str(text: &str) -> serde_json::Result<Option<Coverage>> {
    let file: CoverageFile = serde_json::from_str(text)?;
    Ok(file.total.map(|t| Coverage {
        lines: t.lines.pct,
        statements: t.statements.pct,
        functions: t.functions.pct,
        branches: t.branches.pct,
    }))
}

pub fn parse_coverage_file(path: &Path) -> Result<Option<Coverage>> {
    let text = read(path)?;
    parse_coverage_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"{
      "browsers": [
        {
          "name": "ChromeHeadless",
          "lastResult": {
            "success": 2, "failed": 1, "skipped": 1, "total": 4,
            "suites": [
              {
                "description": "PortfolioComponent",
                "specs": [
                  {"description": "should create", "success": true, "skipped": false, "duration": 12},
                  {"description": "should sell", "success": false, "skipped": false, "duration": 30.5},
                  {"description": "pending", "success": true, "skipped": true}
                ]
              }
            ]
          }
        },
        { "name": "Disconnected" }
      ]
    }"#;

    #[test]
    fn sums_browsers_and_collects_specs() {
        let r = parse_results_str(RESULTS).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!((r.total, r.passed, r.failed, r.skipped), (4, 2, 1, 1));

        let statuses: Vec<TestStatus> = r.cases.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            [TestStatus::Passed, TestStatus::Failed, TestStatus::Skipped]
        );
        assert_eq!(r.cases[1].group, "PortfolioComponent");
        assert_eq!(r.cases[1].time, 30.5);
        assert_eq!(r.cases[2].time, 0.0);
    }

    #[test]
    fn empty_object_is_all_zero() {
        let r = parse_results_str("{}").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(r, BrowserResults::default());
    }

    #[test]
    fn coverage_reads_total_pcts() {
        let text = r#"{
          "total": {
            "lines": {"total": 10, "covered": 8, "pct": 80},
            "statements": {"pct": 79.5},
            "functions": {"pct": "Unknown"},
            "branches": {"pct": 50}
          },
          "src/app.ts": {"lines": {"pct": 1}}
        }"#;
        let c = parse_coverage_str(text).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            c,
            Some(Coverage {
                lines: 80.0,
                statements: 79.5,
                functions: 0.0,
                branches: 50.0
            })
        );
    }

    #[test]
    fn coverage_without_total_block_is_absent() {
        let c = parse_coverage_str(r#"{"src/app.ts":{"lines":{"pct":90}}}"#)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(c, None);

        let c = parse_coverage_str("{}").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(c, None);
    }

    #[test]
    fn browser_totals_saturate() {
        let text = format!(
            r#"{{"browsers":[{{"lastResult":{{"total":{max},"failed":{max}}}}},
                {{"lastResult":{{"total":3,"failed":1,"success":2}}}}]}}"#,
            max = u64::MAX
        );
        let r = parse_results_str(&text).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!((r.total, r.passed, r.failed), (u64::MAX, 2, u64::MAX));
    }

    #[test]
    fn invalid_json_names_the_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("karma-results.json");
        std::fs::write(&path, "not json")?;

        let err = parse_results_file(&path).err();
        assert!(matches!(err, Some(Error::Json { .. })));
        Ok(())
    }
}
