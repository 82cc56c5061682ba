//! Diagnostic reporting for the configuration store
//!
//! The store never prints. Every warning or error it encounters is handed to a
//! [`DiagnosticSink`] as a `(severity, message)` pair, and the caller decides
//! where it goes: tracing, the terminal, or a buffer inspected by tests.

use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Receiver for diagnostics emitted by the store
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);

    fn info(&self, message: &str) {
        self.report(Diagnostic::new(Severity::Info, message));
    }

    fn warn(&self, message: &str) {
        self.report(Diagnostic::new(Severity::Warning, message));
    }

    fn error(&self, message: &str) {
        self.report(Diagnostic::new(Severity::Error, message));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F: Fn(Diagnostic)> DiagnosticSink for FnSink<F> {
    fn report(&self, diagnostic: Diagnostic) {
        (self.0)(diagnostic)
    }
}

/// Forwards diagnostics to `tracing` at the matching level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => tracing::info!("{}", diagnostic.message),
            Severity::Warning => tracing::warn!("{}", diagnostic.message),
            Severity::Error => tracing::error!("{}", diagnostic.message),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// True if any diagnostic of this severity contains `needle`
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.severity == severity && d.message.contains(needle))
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
