//! Line-oriented parser for the configuration file format
//!
//! Parsing never fails. Lines that cannot be placed are skipped and reported
//! to the diagnostic sink, and the best-effort [`Document`] is returned.

use super::diagnostics::DiagnosticSink;
use super::document::{split_list, Document, ListField, RESERVED_SECTION};

const COMMENT_MARKER: char = '#';
const QUOTES: [char; 2] = ['"', '\''];

/// Parse configuration text into a [`Document`]
pub fn parse(text: &str, sink: &dyn DiagnosticSink) -> Document {
    let mut doc = Document::new();
    let mut current: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = trim(raw);
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        if let Some(name) = section_header(line) {
            if name.is_empty() {
                sink.warn(&format!("Empty section name on line {}", idx + 1));
                current = None;
                continue;
            }
            doc.section_entry(name);
            current = Some(name.to_string());
            continue;
        }

        let Some(section) = current.as_deref() else {
            sink.warn(&format!("No section for key-value pair: {}", line));
            continue;
        };

        let (key, value) = split_pair(line);

        if section == RESERVED_SECTION {
            if let Some(field) = ListField::from_key(key) {
                doc.list_mut(field).extend(split_list(&value));
                continue;
            }
        }

        doc.section_entry(section).upsert(key, value);
    }

    doc
}

/// Strip spaces and tabs only
pub(crate) fn trim(s: &str) -> &str {
    s.trim_matches([' ', '\t'])
}

/// Strip quote characters, and any padding they enclose, from both ends
pub fn unquote(value: &str) -> &str {
    value.trim_matches(|c: char| QUOTES.contains(&c) || c == ' ' || c == '\t')
}

fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Split on the first `=`. A line without one is all key and no value.
fn split_pair(line: &str) -> (&str, String) {
    match line.split_once('=') {
        Some((key, value)) => (trim(key), unquote(trim(value)).to_string()),
        None => (trim(line), String::new()),
    }
}
