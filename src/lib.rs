//! PlanetPlus - server manager for ManiaPlanet
//!
//! The library exposes the configuration store the `planetplus` binary is
//! built on: a section-organized, human-editable text file with three staff
//! lists (owners, masteradmins, admins) in the reserved `planetplus` section.

pub mod cli;
pub mod config;
pub mod error;

pub use config::{with_config, ConfigStore, Document, ListField};
pub use error::Error;
