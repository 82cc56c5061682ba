//! CLI command implementations

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::{bold, info, print_config_table, success, warn, ConfigAction, ConsoleSink, OutputFormat, Role};
use crate::config::{self, with_config, ListField};

/// Dispatch a `planetplus config ...` subcommand
pub fn config(path: Option<&Path>, action: ConfigAction) -> Result<()> {
    let path = resolve_config_path(path)?;

    match action {
        ConfigAction::Get { section, key } => get(&path, &section, &key),
        ConfigAction::Set { section, key, value } => set(&path, &section, &key, &value),
        ConfigAction::List { format } => list(&path, format),
        ConfigAction::Grant { role, id } => grant(&path, role, &id),
        ConfigAction::Revoke { role, id } => revoke(&path, role, &id),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Print `section.key = value`
pub fn get(path: &Path, section: &str, key: &str) -> Result<()> {
    let value = with_config(path, ConsoleSink, |store| Ok(store.get(section, key)))?;
    println!("{}.{} = {}", section, key, bold(&value));
    Ok(())
}

/// Overwrite an existing key and save
pub fn set(path: &Path, section: &str, key: &str, value: &str) -> Result<()> {
    let applied = with_config(path, ConsoleSink, |store| {
        store.set(section, key, value);
        if store.is_saved() {
            return Ok(false);
        }
        store.save()?;
        Ok(true)
    })?;

    if applied {
        println!("{}.{} = {}", section, key, bold(value));
    } else {
        warn(&format!(
            "{}.{} does not exist, nothing was changed",
            section, key
        ));
    }
    Ok(())
}

/// Show the whole configuration
pub fn list(path: &Path, format: OutputFormat) -> Result<()> {
    let rendered = with_config(path, ConsoleSink, |store| {
        let doc = store.document();
        let rendered = match format {
            OutputFormat::Table => {
                print_config_table(doc);
                None
            }
            OutputFormat::Json => Some(serde_json::to_string_pretty(doc)?),
            OutputFormat::Yaml => Some(serde_yaml::to_string(doc)?),
        };
        Ok(rendered)
    })?;

    if let Some(rendered) = rendered {
        println!("{}", rendered);
    }
    Ok(())
}

/// Append an id to a staff list
pub fn grant(path: &Path, role: Role, id: &str) -> Result<()> {
    let field = ListField::from(role);
    with_config(path, ConsoleSink, |store| {
        store.push_list(field, id);
        store.save()
    })?;

    success(&format!("Added {} to {}", bold(id), field));
    Ok(())
}

/// Remove an id from a staff list
pub fn revoke(path: &Path, role: Role, id: &str) -> Result<()> {
    let field = ListField::from(role);
    let removed = with_config(path, ConsoleSink, |store| {
        let removed = store.remove_from_list(field, id);
        if removed > 0 {
            store.save()?;
        }
        Ok(removed)
    })?;

    if removed > 0 {
        success(&format!("Removed {} from {}", bold(id), field));
    } else {
        info("Nothing to remove");
    }
    Ok(())
}

/// Explicit `--config` wins, otherwise the per-user location
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config::paths::config_path()?),
    }
}
