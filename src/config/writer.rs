//! Renders a [`Document`] back to the persisted text format

use std::fmt::Write;

use super::document::{Document, ListField, RESERVED_SECTION};

/// Two-line comment written at the top of every saved file
pub const HEADER: &str = "# Configuration file for PlanetPlus\n\
# This file is automatically generated. Do not modify it unless you know what you are doing.\n";

/// Render the whole document. Values are always double-quoted.
pub fn render(doc: &Document) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(HEADER);
    out.push('\n');

    let _ = writeln!(out, "[{}]", RESERVED_SECTION);
    if let Some(reserved) = doc.section(RESERVED_SECTION) {
        for (key, value) in &reserved.entries {
            push_pair(&mut out, key, value);
        }
    }
    for field in ListField::ALL {
        push_pair(&mut out, field.key(), &doc.joined(field));
    }
    out.push('\n');

    for section in doc.sections.iter().filter(|s| s.name != RESERVED_SECTION) {
        let _ = writeln!(out, "[{}]", section.name);
        for (key, value) in &section.entries {
            push_pair(&mut out, key, value);
        }
        out.push('\n');
    }

    out
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{} = \"{}\"", key, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_document() {
        let rendered = render(&Document::new());
        let expected = format!(
            "{}\n[planetplus]\nowners = \"\"\nmasteradmins = \"\"\nadmins = \"\"\n\n",
            HEADER
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_reserved_section_first() {
        let mut doc = Document::new();
        doc.section_entry("server").upsert("host", "1.2.3.4");
        doc.section_entry("planetplus").upsert("description", "Hello");
        doc.owners = vec!["42".to_string(), "7".to_string()];
        doc.admins.push("9".to_string());

        let rendered = render(&doc);
        let body = rendered.strip_prefix(HEADER).unwrap();
        assert_eq!(
            body,
            "\n[planetplus]\ndescription = \"Hello\"\nowners = \"42, 7\"\nmasteradmins = \"\"\nadmins = \"9\"\n\n\
             [server]\nhost = \"1.2.3.4\"\n\n"
        );
    }

    #[test]
    fn test_render_quotes_every_value() {
        let mut doc = Document::new();
        doc.section_entry("database").upsert("port", "3306");
        doc.section_entry("database").upsert("password", "");

        let rendered = render(&doc);
        assert!(rendered.contains("[database]\nport = \"3306\"\npassword = \"\"\n"));
    }

    #[test]
    fn test_header_is_two_comment_lines() {
        let lines: Vec<_> = HEADER.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with('#')));
    }
}
