use std::sync::Arc;

pub const DEFAULT_LABEL: &str = "Unknown";

pub type Result<T> = std::result::Result<T, FieldError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("invalid `{field}` value {value:?}: expected a non-negative number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid `{field}` value {value:?}: expected a non-negative integer")]
    InvalidInteger { field: &'static str, value: String },
}

/// One row of a result file, keyed by the header row.
///
/// Rows shorter than the header simply lack the trailing columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    header: Arc<[String]>,
    values: Vec<String>,
}

impl RawRecord {
    pub fn new(header: Arc<[String]>, values: Vec<String>) -> Self {
        Self { header, values }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let (header, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .unzip();
        Self {
            header: Arc::from(header),
            values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        let idx = self.header.iter().position(|h| h == field)?;
        self.values.get(idx).map(String::as_str)
    }
}

/// Typed view of a single executed request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub label: String,
    /// Response time in milliseconds.
    pub elapsed: f64,
    pub success: bool,
    pub bytes: u64,
}

impl RequestRecord {
    /// Absent columns take their defaults; present but malformed numeric
    /// columns reject the whole record.
    pub fn parse(raw: &RawRecord) -> Result<Self> {
        let elapsed = match raw.get("elapsed") {
            Some(v) => parse_elapsed(v)?,
            None => 0.0,
        };

        let bytes = match raw.get("bytes") {
            Some(v) => parse_bytes(v)?,
            None => 0,
        };

        let success = raw
            .get("success")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

        let label = raw.get("label").unwrap_or(DEFAULT_LABEL).to_string();

        Ok(Self {
            label,
            elapsed,
            success,
            bytes,
        })
    }
}

impl TryFrom<&RawRecord> for RequestRecord {
    type Error = FieldError;

    fn try_from(raw: &RawRecord) -> Result<Self> {
        Self::parse(raw)
    }
}

fn parse_elapsed(raw: &str) -> Result<f64> {
    let invalid = || FieldError::InvalidNumber {
        field: "elapsed",
        value: raw.to_string(),
    };

    let v: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !v.is_finite() || v < 0.0 {
        return Err(invalid());
    }
    Ok(v)
}

fn parse_bytes(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| FieldError::InvalidInteger {
            field: "bytes",
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> Result<RequestRecord> {
        RequestRecord::parse(&RawRecord::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn absent_columns_take_defaults() {
        let rec = parse(&[("threadName", "t-1")]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(rec.label, "Unknown");
        assert_eq!(rec.elapsed, 0.0);
        assert!(!rec.success);
        assert_eq!(rec.bytes, 0);
    }

    #[test]
    fn success_is_case_insensitive() {
        let rec = parse(&[("success", "TRUE")]).unwrap_or_else(|e| panic!("{e}"));
        assert!(rec.success);

        let rec = parse(&[("success", "yes")]).unwrap_or_else(|e| panic!("{e}"));
        assert!(!rec.success);
    }

    #[test]
    fn numeric_fields_accept_surrounding_whitespace() {
        let rec = parse(&[("elapsed", " 12.5 "), ("bytes", "7 ")]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(rec.elapsed, 12.5);
        assert_eq!(rec.bytes, 7);
    }

    #[test]
    fn malformed_numbers_are_field_errors() {
        for pairs in [
            vec![("elapsed", "fast")],
            vec![("elapsed", "")],
            vec![("elapsed", "-1")],
            vec![("elapsed", "NaN")],
            vec![("bytes", "1.5")],
            vec![("bytes", "-3")],
        ] {
            assert!(parse(&pairs).is_err(), "expected error for {pairs:?}");
        }
    }

    #[test]
    fn short_rows_lack_trailing_columns() {
        let header: Arc<[String]> = Arc::from(vec!["label".to_string(), "elapsed".to_string()]);
        let raw = RawRecord::new(header, vec!["GET /".to_string()]);
        assert_eq!(raw.get("label"), Some("GET /"));
        assert_eq!(raw.get("elapsed"), None);
    }
}
