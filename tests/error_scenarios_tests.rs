//! Error scenario and edge case tests
//! Tests the degraded paths of the configuration store
//!
//! Run with: cargo test --test error_scenarios_tests
//! Coverage includes:
//! - Unreadable and unwritable files
//! - Files that are not valid UTF-8
//! - Missing sections and keys
//! - Malformed lines
//! - Use before load and unsaved changes

use planetplus::cli::{commands, Role};
use planetplus::config::{parse, CollectingSink, ConfigStore, ListField, Severity};
use planetplus::error::Error;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// File Access Errors
// ============================================================================

#[test]
fn test_error_load_missing_file_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let sink = CollectingSink::new();
    let mut store = ConfigStore::with_sink(dir.path().join("missing.conf"), &sink);

    store.load();

    assert!(store.document().is_empty());
    assert_eq!(sink.count(Severity::Error), 1);
    assert_eq!(store.get("server", "host"), "");
    println!("✓ Missing file loads as empty document");
}

#[test]
fn test_error_load_directory_path() {
    let dir = TempDir::new().unwrap();
    let sink = CollectingSink::new();
    let mut store = ConfigStore::with_sink(dir.path(), &sink);

    store.load();

    assert!(store.document().is_empty());
    assert!(sink.contains(Severity::Error, "Failed to open file"));
    assert!(store.is_read_only());
    println!("✓ Directory path reported as unreadable");
}

#[test]
fn test_error_save_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let sink = CollectingSink::new();
    let path = dir.path().join("nope").join("config.conf");
    let mut store = ConfigStore::with_sink(&path, &sink);
    store.load();
    store.push_list(ListField::Admin, "1");

    let err = store.save().unwrap_err();

    assert!(matches!(err, Error::FileAccess { .. }));
    assert!(err.to_string().contains("Failed to open file"));
    assert!(!store.is_saved());
    assert_eq!(store.get_list(ListField::Admin), vec!["1"]);
    assert!(!path.exists());
    println!("✓ Save failure leaves in-memory state untouched: {}", err);
}

// ============================================================================
// Non-UTF-8 Files
// ============================================================================

const LATIN1_CONFIG: &[u8] =
    b"[planetplus]\nowners = \"42, 7\"\n\n[server]\nhost = \"1.2.3.4\"\nlogin = \"J\xFCrgen\"\n";

#[test]
fn test_error_cli_set_keeps_latin1_file_intact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.conf");
    fs::write(&path, LATIN1_CONFIG).unwrap();

    let result = commands::set(&path, "server", "host", "5.6.7.8");

    assert!(result.is_err());
    assert_eq!(fs::read(&path).unwrap(), LATIN1_CONFIG);
    println!("✓ CLI set refuses to overwrite a latin-1 file");
}

#[test]
fn test_error_cli_grant_keeps_latin1_file_intact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.conf");
    fs::write(&path, LATIN1_CONFIG).unwrap();

    let result = commands::grant(&path, Role::Admin, "99");

    assert!(result.is_err());
    assert_eq!(fs::read(&path).unwrap(), LATIN1_CONFIG);
    println!("✓ CLI grant refuses to overwrite a latin-1 file");
}

#[test]
fn test_error_cli_set_missing_key_does_not_rewrite_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.conf");
    let original = "[server]\nhost=1.2.3.4   # hand edited\n";
    fs::write(&path, original).unwrap();

    commands::set(&path, "server", "motd", "hello").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    println!("✓ CLI set without a change leaves the file byte for byte");
}

// ============================================================================
// Missing Sections and Keys
// ============================================================================

#[test]
fn test_error_get_missing_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.conf");
    fs::write(&path, "[server]\nhost = \"1.2.3.4\"\n").unwrap();
    let sink = CollectingSink::new();
    let mut store = ConfigStore::with_sink(&path, &sink);
    store.load();

    assert_eq!(store.get("missing_section", "x"), "");
    assert_eq!(sink.count(Severity::Warning), 1);
    assert!(sink.contains(Severity::Warning, "missing_section"));
    println!("✓ Missing section returns empty string with a warning");
}

#[test]
fn test_error_set_missing_section_leaves_document_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.conf");
    fs::write(&path, "[server]\nhost = \"1.2.3.4\"\n").unwrap();
    let sink = CollectingSink::new();
    let mut store = ConfigStore::with_sink(&path, &sink);
    store.load();

    store.set("database", "host", "localhost");

    assert!(!store.document().has_section("database"));
    assert_eq!(store.get("server", "host"), "1.2.3.4");
    assert!(store.is_saved());
    println!("✓ set never creates sections");
}

#[test]
fn test_error_set_missing_key_is_silent_noop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.conf");
    fs::write(&path, "[server]\nhost = \"1.2.3.4\"\n").unwrap();
    let sink = CollectingSink::new();
    let mut store = ConfigStore::with_sink(&path, &sink);
    store.load();

    store.set("server", "port", "2350");

    assert!(sink.is_empty());
    assert!(store.lookup("server", "port").is_err());
    println!("✓ set on missing key adds nothing");
}

// ============================================================================
// Malformed Input
// ============================================================================

#[test]
fn test_error_orphan_key_before_any_section() {
    let sink = CollectingSink::new();
    let doc = parse("host = \"1.2.3.4\"\n", &sink);

    assert!(doc.sections.is_empty());
    assert!(sink.contains(Severity::Warning, "No section"));
    println!("✓ Orphan key discarded without implicit section");
}

#[test]
fn test_error_garbage_input_never_panics() {
    let inputs = [
        "",
        "=",
        "[",
        "]",
        "[]",
        "[[x]]",
        "\"\"\"",
        "= = =",
        "[s]\n=\n",
        "[s]\n'\n",
        "[planetplus]\nowners = , \n",
        "\u{feff}[s]\nk = v",
    ];
    for input in inputs {
        let sink = CollectingSink::new();
        let _ = parse(input, &sink);
    }
    println!("✓ {} malformed inputs parsed without panic", inputs.len());
}

#[test]
fn test_error_stray_list_delimiters_are_preserved() {
    let sink = CollectingSink::new();
    let doc = parse("[planetplus]\nowners = \"1, , 2\"\n", &sink);
    assert_eq!(doc.owners, vec!["1", "", "2"]);
    println!("✓ Empty list tokens kept: {:?}", doc.owners);
}

// ============================================================================
// Lifecycle Advisories
// ============================================================================

#[test]
fn test_error_accessors_before_load() {
    let dir = TempDir::new().unwrap();
    let sink = CollectingSink::new();
    let mut store = ConfigStore::with_sink(dir.path().join("config.conf"), &sink);

    store.push_list(ListField::Owner, "42");
    assert_eq!(store.get_list(ListField::Owner), vec!["42"]);

    assert_eq!(sink.count(Severity::Warning), 2);
    assert_eq!(sink.count(Severity::Info), 2);
    println!("✓ Accessors before load proceed with advisory diagnostics");
}

#[test]
fn test_error_flush_unsaved_forces_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.conf");
    fs::write(&path, "[server]\nhost = \"a\"\n").unwrap();
    let sink = CollectingSink::new();
    let mut store = ConfigStore::with_sink(&path, &sink);
    store.load();
    store.set("server", "host", "b");

    store.flush_unsaved().unwrap();

    assert!(store.is_saved());
    assert!(fs::read_to_string(&path).unwrap().contains("host = \"b\""));
    assert!(sink.contains(Severity::Warning, "not saved"));
    println!("✓ Unsaved changes flushed with a developer warning");
}

#[test]
fn test_error_display_messages() {
    let err = Error::SectionNotFound("server".to_string());
    assert_eq!(err.to_string(), "Section not found: server");

    let err = Error::KeyNotFound {
        section: "server".to_string(),
        key: "host".to_string(),
    };
    assert_eq!(err.to_string(), "Key not found: server.host");
    println!("✓ Error messages formatted");
}
