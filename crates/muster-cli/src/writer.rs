//! Delimited record output.

use muster_domain::{FieldRecord, RecordSink};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::{self, Write};

/// Field delimiter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `|`
    #[default]
    Pipe,
    /// `,`
    Comma,
}

impl Delimiter {
    /// Delimiter character.
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Pipe => '|',
            Delimiter::Comma => ',',
        }
    }
}

/// Writes records as delimiter-separated lines.
///
/// A field holding the delimiter, a double quote or a line break is
/// wrapped in double quotes with inner quotes doubled; everything else is
/// written as is.
pub struct DelimitedWriter<W: Write> {
    inner: W,
    delimiter: Delimiter,
    rows: usize,
}

impl<W: Write> DelimitedWriter<W> {
    /// Create a writer.
    pub fn new(inner: W, delimiter: Delimiter) -> Self {
        Self {
            inner,
            delimiter,
            rows: 0,
        }
    }

    /// Records written so far (the header row is not counted).
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    fn write_line<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) -> io::Result<()> {
        let delimiter = self.delimiter.as_char();
        let mut line = String::new();
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                line.push(delimiter);
            }
            line.push_str(&quote(field, delimiter));
        }
        line.push('\n');
        self.inner.write_all(line.as_bytes())
    }
}

impl<W: Write> RecordSink for DelimitedWriter<W> {
    type Error = io::Error;

    fn write_header(&mut self) -> io::Result<()> {
        self.write_line(FieldRecord::COLUMNS)
    }

    fn write_record(&mut self, record: &FieldRecord) -> io::Result<()> {
        self.write_line(record.values())?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Quote `field` if it would break the line structure.
fn quote(field: &str, delimiter: char) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
