//! The configuration store: one document bound to one file path
//!
//! Callers go through four operations: [`ConfigStore::load`],
//! [`ConfigStore::get`], [`ConfigStore::set`] and [`ConfigStore::save`], plus
//! the staff list accessors. Nothing in here prints or fails hard; problems
//! are reported to the [`DiagnosticSink`] and the store degrades to empty
//! values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::diagnostics::{DiagnosticSink, TracingSink};
use super::document::{split_list, Document, ListField, Section, RESERVED_SECTION};
use super::parser;
use super::writer;
use crate::error::{Error, Result};

const DEVELOPER_HINT: &str = "-> This is a mistake from the developer of the project, please report it.";

pub struct ConfigStore<S: DiagnosticSink = TracingSink> {
    path: PathBuf,
    doc: Document,
    sink: S,
    loaded: bool,
    saved: bool,
    read_only: bool,
}

impl ConfigStore<TracingSink> {
    /// Store that reports through `tracing`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_sink(path, TracingSink)
    }
}

impl<S: DiagnosticSink> ConfigStore<S> {
    pub fn with_sink(path: impl Into<PathBuf>, sink: S) -> Self {
        Self {
            path: path.into(),
            doc: Document::new(),
            sink,
            loaded: false,
            // Nothing to flush until something changes
            saved: true,
            read_only: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.doc.sections.iter()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Set when the file exists but could not be read intact; saving is refused
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Read and parse the file. An unreadable file leaves the document empty.
    ///
    /// Invalid UTF-8 is decoded lossily so values stay readable, but the store
    /// becomes read-only: writing the replacement characters back would
    /// corrupt the file. The same goes for a file that exists and cannot be
    /// read at all. Only a missing file may be created by a later save.
    pub fn load(&mut self) {
        tracing::debug!(path = %self.path.display(), "Loading configuration");

        match fs::read(&self.path) {
            Ok(bytes) => {
                let text = match String::from_utf8(bytes) {
                    Ok(text) => {
                        self.read_only = false;
                        text
                    }
                    Err(e) => {
                        self.sink.warn(&format!(
                            "Configuration file is not valid UTF-8, it will not be overwritten: {}",
                            self.path.display()
                        ));
                        self.read_only = true;
                        String::from_utf8_lossy(e.as_bytes()).into_owned()
                    }
                };
                self.doc = parser::parse(&text, &self.sink);
                self.loaded = true;
                self.saved = true;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Configuration file unreadable");
                self.sink
                    .error(&format!("Failed to open file: {}", self.path.display()));
                self.doc = Document::new();
                self.read_only = e.kind() != io::ErrorKind::NotFound;
            }
        }
    }

    /// Write the whole document to disk
    pub fn save(&mut self) -> Result<()> {
        if self.read_only {
            self.sink.error(&format!(
                "Refusing to overwrite {}: it could not be read intact",
                self.path.display()
            ));
            return Err(Error::ReadOnly {
                path: self.path.clone(),
            });
        }

        let content = writer::render(&self.doc);

        match fs::write(&self.path, content) {
            Ok(()) => {
                self.saved = true;
                tracing::debug!(path = %self.path.display(), "Saved configuration");
                Ok(())
            }
            Err(source) => {
                self.sink
                    .error(&format!("Failed to open file: {}", self.path.display()));
                Err(Error::FileAccess {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Value of `section.key`, or an empty string if either is missing.
    ///
    /// The staff list keys (`owners`, `masteradmins`, `admins`) always resolve
    /// to the joined list, whatever section is passed.
    pub fn get(&self, section: &str, key: &str) -> String {
        self.check_if_loaded();

        if let Some(field) = ListField::from_key(key) {
            return self.doc.joined(field);
        }

        let Some(found) = self.doc.section(section) else {
            self.sink.warn(&format!("Section not found: {}", section));
            return String::new();
        };

        match found.get(key) {
            Some(value) => value.to_string(),
            None => {
                self.sink.warn(&format!("Key not found: {}", key));
                String::new()
            }
        }
    }

    /// Like [`get`](Self::get) but distinguishes missing from empty.
    ///
    /// Reports nothing to the sink, not even the use-before-load advisory:
    /// the caller gets the reason in the error instead.
    pub fn lookup(&self, section: &str, key: &str) -> Result<String> {
        if let Some(field) = ListField::from_key(key) {
            return Ok(self.doc.joined(field));
        }

        let found = self
            .doc
            .section(section)
            .ok_or_else(|| Error::SectionNotFound(section.to_string()))?;

        found
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| Error::KeyNotFound {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Overwrite an existing key.
    ///
    /// Neither sections nor keys are created here: a missing section is
    /// reported and skipped, a missing key is silently skipped. Staff list
    /// keys replace the whole list with the `", "`-separated tokens of `value`.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.check_if_loaded();

        if let Some(field) = ListField::from_key(key) {
            *self.doc.list_mut(field) = split_list(value);
            self.saved = false;
            return;
        }

        let Some(found) = self.doc.section_mut(section) else {
            self.sink.warn(&format!("Section not found: {}", section));
            return;
        };

        if found.replace(key, value) {
            self.saved = false;
        } else {
            tracing::debug!(section, key, "set on missing key ignored");
        }
    }

    /// Staff list contents in file order
    pub fn get_list(&self, field: ListField) -> Vec<String> {
        self.check_if_loaded();
        self.doc.list(field).to_vec()
    }

    /// Append one identifier to a staff list
    pub fn push_list(&mut self, field: ListField, id: &str) {
        self.check_if_loaded();
        self.doc.list_mut(field).push(id.to_string());
        self.saved = false;
    }

    /// Drop every occurrence of `id` from a staff list. Returns how many were removed.
    pub fn remove_from_list(&mut self, field: ListField, id: &str) -> usize {
        self.check_if_loaded();
        let list = self.doc.list_mut(field);
        let before = list.len();
        list.retain(|entry| entry != id);
        let removed = before - list.len();
        if removed == 0 {
            self.sink.warn(&format!("{} not found in {}", id, field));
        } else {
            self.saved = false;
        }
        removed
    }

    pub fn clear_list(&mut self, field: ListField) {
        self.check_if_loaded();
        let list = self.doc.list_mut(field);
        if !list.is_empty() {
            list.clear();
            self.saved = false;
        }
    }

    /// Explicitly create an empty section
    pub fn add_section(&mut self, name: &str) {
        self.check_if_loaded();

        if name.is_empty() {
            self.sink.warn("Section name cannot be empty");
            return;
        }
        if self.doc.has_section(name) {
            self.sink.warn(&format!("Section already exists: {}", name));
            return;
        }
        self.doc.section_entry(name);
        self.saved = false;
    }

    /// Insert or overwrite a key inside an existing section
    pub fn add_key(&mut self, section: &str, key: &str, value: &str) {
        self.check_if_loaded();

        if section == RESERVED_SECTION {
            if let Some(field) = ListField::from_key(key) {
                self.doc.list_mut(field).extend(split_list(value));
                self.saved = false;
                return;
            }
        }

        let Some(found) = self.doc.section_mut(section) else {
            self.sink.warn(&format!("Section not found: {}", section));
            return;
        };
        found.upsert(key, value);
        self.saved = false;
    }

    pub fn remove_key(&mut self, section: &str, key: &str) {
        self.check_if_loaded();

        let Some(found) = self.doc.section_mut(section) else {
            self.sink.warn(&format!("Section not found: {}", section));
            return;
        };
        if found.remove(key) {
            self.saved = false;
        } else {
            self.sink.warn(&format!("Key not found: {}", key));
        }
    }

    pub fn remove_section(&mut self, name: &str) {
        self.check_if_loaded();

        if name == RESERVED_SECTION {
            self.sink
                .warn(&format!("Section {} cannot be removed", RESERVED_SECTION));
            return;
        }
        if self.doc.remove_section(name) {
            self.saved = false;
        } else {
            self.sink.warn(&format!("Section not found: {}", name));
        }
    }

    /// Save if there are unflushed changes, telling the developer they forgot to.
    ///
    /// A read-only store drops its changes with a warning instead.
    pub fn flush_unsaved(&mut self) -> Result<()> {
        if self.saved {
            return Ok(());
        }
        if self.read_only {
            self.sink.warn(&format!(
                "Unsaved changes discarded, {} could not be read intact",
                self.path.display()
            ));
            return Ok(());
        }
        self.sink
            .warn("Configuration file not saved. Consider using ConfigStore::save() first.");
        self.sink.info(DEVELOPER_HINT);
        self.save()
    }

    fn check_if_loaded(&self) {
        if !self.loaded {
            self.sink
                .warn("Configuration file not loaded. Consider using ConfigStore::load() first.");
            self.sink.info(DEVELOPER_HINT);
        }
    }
}

/// Load the file at `path`, hand the store to `f`, and flush on the way out.
///
/// Whatever `f` returns, unsaved changes are written before this returns. A
/// flush failure only surfaces if `f` itself succeeded.
pub fn with_config<S, T, F>(path: impl Into<PathBuf>, sink: S, f: F) -> Result<T>
where
    S: DiagnosticSink,
    F: FnOnce(&mut ConfigStore<S>) -> Result<T>,
{
    let mut store = ConfigStore::with_sink(path, sink);
    store.load();

    let result = f(&mut store);
    let flushed = store.flush_unsaved();

    match (result, flushed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), _) => Err(e),
    }
}
