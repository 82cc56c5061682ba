//! Filesystem layout: where the configuration lives and what a fresh one contains

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

const APP_DIR: &str = "planetplus";
const CONFIG_DIR: &str = "config";
const CONFIG_FILENAME: &str = "config.conf";

/// Overrides the `<base>/planetplus` directory entirely
pub const HOME_ENV: &str = "PLANETPLUS_HOME";

/// Root directory holding config, logs and database folders.
///
/// `$PLANETPLUS_HOME` if set, otherwise `~/.local/share/planetplus` on
/// Unix and `C:\planetplus` on Windows.
pub fn base_dir() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    default_base_dir()
}

#[cfg(not(windows))]
fn default_base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::HomeNotFound)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}

#[cfg(windows)]
fn default_base_dir() -> Result<PathBuf> {
    Ok(PathBuf::from("C:\\").join(APP_DIR))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(base_dir()?.join(CONFIG_DIR))
}

/// Path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Content written by `planetplus setup` before any prompt
pub fn default_config_content() -> &'static str {
    r#"# This is the default configuration.
# This file is automatically generated. Do not modify it unless you know what you are doing.

[planetplus]
description = "This server uses PlanetPlus !"
owners = ""
masteradmins = ""
admins = ""

[database]
name = "planetplus"
host = "localhost"
port = "3306"
user = "mariadb-user"
password = "mariadb-password"

[server]
host = ""
port = ""
login = ""
password = ""
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::diagnostics::CollectingSink;
    use crate::config::parser::parse;

    #[test]
    fn test_default_config_parses_cleanly() {
        let sink = CollectingSink::new();
        let doc = parse(default_config_content(), &sink);

        assert!(sink.is_empty());
        assert_eq!(
            doc.section("planetplus").unwrap().get("description"),
            Some("This server uses PlanetPlus !")
        );
        assert!(doc.owners.is_empty());
        assert_eq!(doc.section("database").unwrap().get("port"), Some("3306"));
        assert_eq!(doc.section("server").unwrap().entries.len(), 4);
    }

    #[test]
    fn test_config_path_layout() {
        env::set_var(HOME_ENV, "/tmp/pp-home");
        let path = config_path().unwrap();
        env::remove_var(HOME_ENV);

        assert_eq!(path, PathBuf::from("/tmp/pp-home/config/config.conf"));

        #[cfg(not(windows))]
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                base_dir().unwrap(),
                home.join(".local").join("share").join("planetplus")
            );
        }
    }
}
