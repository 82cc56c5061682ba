//! Configuration store for PlanetPlus

pub mod diagnostics;
mod document;
pub mod parser;
pub mod paths;
mod store;
pub mod writer;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, FnSink, Severity, TracingSink};
pub use document::{split_list, Document, ListField, Section, LIST_DELIMITER, RESERVED_SECTION};
pub use parser::parse;
pub use store::{with_config, ConfigStore};
pub use writer::render;
