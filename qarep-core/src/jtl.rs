//! Load-generator result files (`.jtl`, comma separated with a header row).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use qarep_metrics::RawRecord;

use crate::csv::Table;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("result file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to parse result file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: crate::csv::Error,
    },

    #[error("result file {} is not valid UTF-8", .0.display())]
    Encoding(PathBuf),

    #[error("failed to read result file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Reads every row of a result file, in file order.
pub fn read_results(path: &Path) -> Result<Vec<RawRecord>> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let text = String::from_utf8(bytes).map_err(|_| Error::Encoding(path.to_path_buf()))?;

    let table = Table::parse(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(table.into_records())
}

/// Like [`read_results`], but any failure is logged and treated as an empty
/// result set.
pub fn load_results(path: &Path) -> Vec<RawRecord> {
    match read_results(path) {
        Ok(records) => records,
        Err(err) => {
            tracing::error!(error = %err, "could not load results");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let err = match read_results(&dir.path().join("nope.jtl")) {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn rows_keep_file_order_and_ignore_unknown_columns() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.jtl");
        std::fs::write(
            &path,
            "timeStamp,elapsed,label,responseCode,success,bytes\n\
             1700000000000,120,GET /stocks,200,true,512\n\
             1700000000100,80,POST /login,500,false,64\n",
        )?;

        let records = read_results(&path)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("label"), Some("GET /stocks"));
        assert_eq!(records[1].get("elapsed"), Some("80"));
        assert_eq!(records[1].get("responseCode"), Some("500"));
        Ok(())
    }

    #[test]
    fn empty_file_is_a_parse_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.jtl");
        std::fs::write(&path, "")?;

        assert!(matches!(
            read_results(&path),
            Err(Error::Parse {
                source: crate::csv::Error::MissingHeader,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn malformed_file_loads_as_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.jtl");
        std::fs::write(&path, "label,elapsed\n\"GET /,10\n")?;

        assert!(matches!(read_results(&path), Err(Error::Parse { .. })));
        assert!(load_results(&path).is_empty());
        Ok(())
    }
}
