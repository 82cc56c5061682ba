//! In-memory model of the configuration file

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Section that holds the staff lists alongside its ordinary keys
pub const RESERVED_SECTION: &str = "planetplus";

/// Delimiter used to join list fields into a single value
pub const LIST_DELIMITER: &str = ", ";

/// The three multi-valued staff fields of the reserved section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Owner,
    MasterAdmin,
    Admin,
}

impl ListField {
    /// All list fields, in the order they are written to disk
    pub const ALL: [ListField; 3] = [ListField::Owner, ListField::MasterAdmin, ListField::Admin];

    /// Key under which the field is persisted
    pub fn key(self) -> &'static str {
        match self {
            ListField::Owner => "owners",
            ListField::MasterAdmin => "masteradmins",
            ListField::Admin => "admins",
        }
    }

    /// Map a persisted key back to its field
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for ListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A named group of key/value pairs, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Overwrite an existing key. Returns false if the key is absent.
    pub fn replace(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => {
                *v = value.into();
                true
            }
            None => false,
        }
    }

    /// Overwrite the key if present, otherwise append it
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if !self.replace(&key, value.clone()) {
            self.entries.push((key, value));
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }
}

/// Complete configuration for one file: every section plus the staff lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
    pub owners: Vec<String>,
    pub masteradmins: Vec<String>,
    pub admins: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Fetch a section, creating it empty on first use
    pub fn section_entry(&mut self, name: &str) -> &mut Section {
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != name);
        self.sections.len() != before
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Owner => &self.owners,
            ListField::MasterAdmin => &self.masteradmins,
            ListField::Admin => &self.admins,
        }
    }

    pub fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Owner => &mut self.owners,
            ListField::MasterAdmin => &mut self.masteradmins,
            ListField::Admin => &mut self.admins,
        }
    }

    /// The list rendered the way it is persisted: `a, b, c`
    pub fn joined(&self, field: ListField) -> String {
        self.list(field).join(LIST_DELIMITER)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && ListField::ALL.iter().all(|f| self.list(*f).is_empty())
    }
}

/// Serializes as `{ section: { key: value } }` in file order. The staff
/// lists appear as sequences under the reserved section.
impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let reserved = self
            .section(RESERVED_SECTION)
            .cloned()
            .unwrap_or_else(|| Section::new(RESERVED_SECTION));
        map.serialize_entry(RESERVED_SECTION, &ReservedView { doc: self, section: &reserved })?;
        for section in self.sections.iter().filter(|s| s.name != RESERVED_SECTION) {
            map.serialize_entry(&section.name, &EntriesView(&section.entries))?;
        }
        map.end()
    }
}

struct EntriesView<'a>(&'a [(String, String)]);

impl Serialize for EntriesView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ReservedView<'a> {
    doc: &'a Document,
    section: &'a Section,
}

impl Serialize for ReservedView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.section.entries.len() + 3))?;
        for (key, value) in &self.section.entries {
            map.serialize_entry(key, value)?;
        }
        for field in ListField::ALL {
            map.serialize_entry(field.key(), self.doc.list(field))?;
        }
        map.end()
    }
}

/// Split a persisted list value. Empty tokens between delimiters are kept,
/// but an entirely empty value is an empty list.
pub fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(LIST_DELIMITER).map(str::to_string).collect()
}
