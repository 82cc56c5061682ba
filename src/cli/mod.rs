//! CLI interface for PlanetPlus

pub mod commands;
mod output;
pub mod setup;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ListField;

#[derive(Parser)]
#[command(name = "planetplus")]
#[command(author = "PlanetPlus")]
#[command(version)]
#[command(about = "Planetplus is a server manager for ManiaPlanet 4.", long_about = None)]
#[command(after_help = "Please report bugs on GitHub or on Discord.")]
pub struct Cli {
    /// Path to the configuration file (defaults to the per-user planetplus directory)
    #[arg(short, long, global = true, env = "PLANETPLUS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up the planetplus server directories and configuration
    Setup {
        /// Skip interactive prompts and keep the defaults
        #[arg(short, long)]
        quick: bool,
    },

    /// Read or change configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get the value of a configuration key
    Get {
        /// Section name, e.g. server
        section: String,

        /// Key name, e.g. host
        key: String,
    },

    /// Set the value of an existing configuration key
    Set {
        section: String,
        key: String,
        value: String,
    },

    /// Show every section and staff list
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add an id to a staff list
    Grant {
        /// owner, masteradmin or admin
        role: Role,

        id: String,
    },

    /// Remove an id from a staff list
    Revoke {
        /// owner, masteradmin or admin
        role: Role,

        id: String,
    },

    /// Print the resolved configuration file path
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Owner,
    Masteradmin,
    Admin,
}

impl From<Role> for ListField {
    fn from(role: Role) -> Self {
        match role {
            Role::Owner => ListField::Owner,
            Role::Masteradmin => ListField::MasterAdmin,
            Role::Admin => ListField::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
