//! Minimal comma-separated codec.
//!
//! Reading follows RFC 4180 quoting: `""` inside a quoted field is a literal
//! quote and quoted fields may span lines. A stray quote inside an unquoted
//! field is kept verbatim. Blank lines are skipped.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use qarep_metrics::RawRecord;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("missing header row")]
    MissingHeader,
}

/// Header row plus data rows, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = parse_rows(text)?.into_iter();
        let header = rows.next().ok_or(Error::MissingHeader)?;
        Ok(Self {
            header,
            rows: rows.collect(),
        })
    }

    pub fn into_records(self) -> Vec<RawRecord> {
        let header: Arc<[String]> = Arc::from(self.header);
        self.rows
            .into_iter()
            .map(|values| RawRecord::new(header.clone(), values))
            .collect()
    }

    /// First data row keyed by column name.
    pub fn first_row_map(&self) -> Option<BTreeMap<String, String>> {
        let row = self.rows.first()?;
        Some(
            self.header
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect(),
        )
    }
}

pub fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_has_content = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
                row_has_content = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_has_content = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                line += 1;
                if row_has_content {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                row_has_content = false;
            }
            _ => {
                field.push(ch);
                row_has_content = true;
            }
        }
    }

    if in_quotes {
        return Err(Error::UnterminatedQuote { line: quote_line });
    }
    if row_has_content {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[derive(Debug, Default)]
pub struct CsvWriter {
    out: String,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut first = true;
        for f in fields {
            if !first {
                self.out.push(',');
            }
            first = false;
            self.out.push_str(&escape_field(f.as_ref()));
        }
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}
