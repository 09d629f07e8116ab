use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read threshold config {}: {source}", .path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Direction of a limit, taken from the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum LimitKind {
    #[strum(serialize = "max")]
    Max,
    #[strum(serialize = "min")]
    Min,
}

impl LimitKind {
    pub fn of_key(key: &str) -> Option<Self> {
        let (prefix, rest) = key.split_once('.')?;
        if rest.is_empty() {
            return None;
        }
        prefix.parse().ok()
    }

    /// True when `observed` is out of bounds for `limit`.
    pub fn violated(self, observed: f64, limit: f64) -> bool {
        match self {
            Self::Max => observed > limit,
            Self::Min => observed < limit,
        }
    }
}

/// Named numeric limits loaded from a `key=value` properties file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSet {
    limits: BTreeMap<String, f64>,
}

impl ThresholdSet {
    /// Keeps only `max.*` / `min.*` keys. `#` lines and lines without `=` are
    /// ignored; a limit that is not a number is dropped with a warning.
    pub fn parse_properties(text: &str) -> Self {
        let mut limits = BTreeMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if LimitKind::of_key(key).is_none() {
                continue;
            }

            match value.parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    limits.insert(key.to_string(), v);
                }
                _ => tracing::warn!(key, value, "ignoring non-numeric threshold"),
            }
        }

        Self { limits }
    }

    /// Returns `None` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(Self::parse_properties(&text))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, limit: f64) {
        self.limits.insert(key.into(), limit);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.limits.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ThresholdSet {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        let mut set = Self::default();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_properties_keeps_prefixed_numeric_keys() {
        let set = ThresholdSet::parse_properties(
            "# load test settings\n\
             users=50\n\
             max.avg.response.time.ms = 500\n\
             max.error.percentage=5\n\
             #max.p95.response.time.ms=100\n\
             min.success.percentage=abc\n\
             ramp.up=10\n\
             garbage line\n",
        );

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("max.avg.response.time.ms"), Some(500.0));
        assert_eq!(set.get("max.error.percentage"), Some(5.0));
        assert_eq!(set.get("max.p95.response.time.ms"), None);
        assert_eq!(set.get("users"), None);
    }

    #[test]
    fn limit_kind_from_key_prefix() {
        assert_eq!(LimitKind::of_key("max.error.percentage"), Some(LimitKind::Max));
        assert_eq!(LimitKind::of_key("min.success.percentage"), Some(LimitKind::Min));
        assert_eq!(LimitKind::of_key("maximum.x"), None);
        assert_eq!(LimitKind::of_key("max."), None);
        assert_eq!(LimitKind::of_key("max"), None);
    }

    #[test]
    fn missing_config_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let loaded = ThresholdSet::load(&dir.path().join("load-test-config.properties"))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(loaded.is_none());
    }
}
