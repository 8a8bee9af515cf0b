//! A decoded CSV record.

use indexmap::IndexMap;
use serde::Serialize;

/// One decoded data line, keyed by header name in header order.
///
/// Duplicate header names collapse onto a single key; the right-most column
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CsvRow {
    fields: IndexMap<String, String>,
}

impl CsvRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(header.into(), value.into());
    }

    /// Exact-name lookup.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }

    /// First value whose header equals `header` ignoring ASCII case.
    pub fn get_ignore_case(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(header))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn has_header_ignore_case(&self, header: &str) -> bool {
        self.headers().any(|h| h.eq_ignore_ascii_case(header))
    }
}

impl<K, V> FromIterator<(K, V)> for CsvRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = CsvRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}
