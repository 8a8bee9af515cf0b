//! Decoding comma-separated text into rows.

use crate::row::CsvRow;

/// Decode `text` into rows keyed by the (trimmed) names on its first line.
///
/// A leading byte-order mark is dropped. Blank lines are ignored. A line whose field count differs from the header
/// is skipped with a warning; decoding continues with the next line. Line
/// breaks inside quoted fields are not supported: every physical line is one
/// record.
pub fn decode(text: &str) -> Vec<CsvRow> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines().enumerate();

    let Some((_, header_line)) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = parse_line(header_line)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values = parse_line(line);
        if values.len() != headers.len() {
            tracing::warn!(
                line = index + 1,
                found = values.len(),
                expected = headers.len(),
                "skipping CSV line with mismatched field count"
            );
            continue;
        }

        rows.push(headers.iter().cloned().zip(values).collect());
    }

    rows
}

/// Split one line into fields.
///
/// A `"` toggles quoted mode; inside a quoted section `""` stands for a
/// literal quote and commas do not split. Unquoted whitespace is preserved.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}
