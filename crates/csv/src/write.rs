//! Encoding rows into comma-separated text.

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How field values are protected when written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Write every value verbatim.
    ///
    /// Byte-compatible with files exported by earlier releases. A value
    /// containing a comma, quote or newline produces a line that does not
    /// decode back to the same fields.
    #[default]
    Never,
    /// Quote a value only when it contains a comma, quote or newline;
    /// embedded quotes are doubled.
    Minimal,
}

impl Quoting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quoting::Never => "never",
            Quoting::Minimal => "minimal",
        }
    }
}

impl core::fmt::Display for Quoting {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown quoting mode `{0}` (expected `never` or `minimal`)")]
pub struct ParseQuotingError(String);

impl FromStr for Quoting {
    type Err = ParseQuotingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" | "none" => Ok(Quoting::Never),
            "minimal" => Ok(Quoting::Minimal),
            other => Err(ParseQuotingError(other.to_string())),
        }
    }
}

/// Quote `value` if it contains a delimiter, a quote or a line break.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Encode a header line followed by one line per row, joined with `\n`.
///
/// No trailing newline is written. An empty `rows` yields just the header.
pub fn encode<H, R, F>(header: &[H], rows: R, quoting: Quoting) -> String
where
    H: AsRef<str>,
    R: IntoIterator,
    R::Item: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    let mut out = join_line(header.iter().map(|h| h.as_ref()), quoting);
    for row in rows {
        out.push('\n');
        let fields: Vec<F> = row.into_iter().collect();
        out.push_str(&join_line(fields.iter().map(|f| f.as_ref()), quoting));
    }
    out
}

fn join_line<'a>(fields: impl Iterator<Item = &'a str>, quoting: Quoting) -> String {
    let mut line = String::new();
    for (i, field) in fields.enumerate() {
        if i > 0 {
            line.push(',');
        }
        match quoting {
            Quoting::Never => line.push_str(field),
            Quoting::Minimal => line.push_str(&escape_field(field)),
        }
    }
    line
}
