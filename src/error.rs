//! Error types for PlanetPlus

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to overwrite {}: it could not be read intact", .path.display())]
    ReadOnly { path: PathBuf },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Key not found: {section}.{key}")]
    KeyNotFound { section: String, key: String },

    #[error("Home directory not found. Set HOME or PLANETPLUS_HOME.")]
    HomeNotFound,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
