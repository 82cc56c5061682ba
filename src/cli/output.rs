//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::config::{Diagnostic, DiagnosticSink, Document, ListField, Severity, RESERVED_SECTION};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

pub fn bold(message: &str) -> String {
    message.bold().to_string()
}

/// Prints store diagnostics with the same markers as the rest of the CLI
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::debug!(severity = %diagnostic.severity, "{}", diagnostic.message);
        match diagnostic.severity {
            Severity::Info => info(&diagnostic.message),
            Severity::Warning => warn(&diagnostic.message),
            Severity::Error => error(&diagnostic.message),
        }
    }
}

/// Print a table of every section, key and staff list
pub fn print_config_table(doc: &Document) {
    if doc.is_empty() {
        info("Configuration is empty. Run 'planetplus setup' to create one");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Section").fg(Color::Cyan),
            Cell::new("Key").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    if let Some(reserved) = doc.section(RESERVED_SECTION) {
        for (key, value) in &reserved.entries {
            table.add_row(vec![Cell::new(RESERVED_SECTION), Cell::new(key), Cell::new(value)]);
        }
    }
    for field in ListField::ALL {
        table.add_row(vec![
            Cell::new(RESERVED_SECTION),
            Cell::new(field.key()).fg(Color::Yellow),
            Cell::new(doc.joined(field)),
        ]);
    }

    for section in doc.sections.iter().filter(|s| s.name != RESERVED_SECTION) {
        for (key, value) in &section.entries {
            table.add_row(vec![Cell::new(&section.name), Cell::new(key), Cell::new(value)]);
        }
    }

    println!("{table}");
}
