//! Interactive setup wizard for PlanetPlus
//!
//! Creates the directory layout, writes the default configuration, checks for
//! external requirements and then asks for the database and server
//! credentials, storing them through the configuration store.

use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::cli::{bold, success, warn, ConsoleSink};
use crate::config::{paths, with_config, ConfigStore, DiagnosticSink, ListField};

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: &str = "3306";
const LOG_FILES: [&str; 2] = ["server.log", "chat.log"];

/// Database credentials gathered by the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseAnswers {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
}

/// Dedicated server credentials gathered by the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerAnswers {
    pub host: String,
    pub port: String,
    pub login: String,
    pub password: String,
}

/// Run the setup wizard
pub fn run_setup_wizard(config_override: Option<&Path>, quick: bool) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    let _ = term.clear_screen();
    println!("{}", "> Setting up PlanetPlus...".bold());
    println!();

    let base = paths::base_dir()?;

    if base.exists() {
        warn(&format!("Directory already exists: {}", bold(&base.display().to_string())));
        let overwrite = !quick
            && Confirm::with_theme(&theme)
                .with_prompt("Do you want to overwrite it? This will erase everything in the planetplus folder!")
                .default(false)
                .interact()?;

        if overwrite {
            fs::remove_dir_all(&base)
                .with_context(|| format!("Failed to remove directory: {}", base.display()))?;
            success(&format!("Removed directory: {}", bold(&base.display().to_string())));
            println!();
        }
    }

    let config_path = match config_override {
        Some(path) => path.to_path_buf(),
        None => paths::config_path()?,
    };
    scaffold(&base, &config_path)?;

    println!();
    println!("{}", "> Checking for requirements...".bold());
    println!();
    let mariadb_ok = check_requirement("mariadb");
    check_requirement("curl");

    if !mariadb_ok {
        println!();
        println!("{}", "MariaDB is not installed! Please install MariaDB and try again.".red());
        return Ok(());
    }

    if quick {
        println!();
        println!("{}", "✓ Quick setup complete!".green().bold());
        println!("Configuration can be found in {}", bold(&config_path.display().to_string()));
        println!("Run 'planetplus setup' (without --quick) to enter credentials.");
        return Ok(());
    }

    println!();
    println!("{}", "> Setting up Config file...".bold());
    println!(
        "{}",
        "Leave blank if you don't know, you will be able to change it later. See --help.".dimmed()
    );
    println!();

    let owner = Input::<String>::with_theme(&theme)
        .with_prompt("Enter the server owner ID")
        .allow_empty(true)
        .interact_text()?;

    let database = DatabaseAnswers {
        host: prompt(&theme, "Enter your MariaDB host")?,
        port: prompt(&theme, "Enter your MariaDB port")?,
        user: prompt(&theme, "Enter your MariaDB username")?,
        password: Password::with_theme(&theme)
            .with_prompt("Enter your MariaDB password")
            .allow_empty_password(true)
            .interact()?,
    };

    let server = ServerAnswers {
        host: prompt(&theme, "Enter your server host")?,
        port: prompt(&theme, "Enter your server port")?,
        login: prompt(&theme, "Enter your server login")?,
        password: Password::with_theme(&theme)
            .with_prompt("Enter your server password")
            .allow_empty_password(true)
            .interact()?,
    };

    println!();
    with_config(&config_path, ConsoleSink, |store| {
        store_answers(store, &owner, &database, &server)
    })?;

    success("Database credentials saved!");
    success("Server credentials saved!");
    success(&format!(
        "Configuration can be found in {}",
        bold(&config_path.display().to_string())
    ));

    Ok(())
}

/// Create the planetplus folders, log files and default configuration
pub fn scaffold(base: &Path, config_path: &Path) -> Result<()> {
    create_dir(base)?;

    if let Some(parent) = config_path.parent() {
        create_dir(parent)?;
    }
    if !config_path.exists() {
        fs::write(config_path, paths::default_config_content()).with_context(|| {
            format!("Failed to create default configuration file: {}", config_path.display())
        })?;
        success(&format!("Created file: {}", bold(&config_path.display().to_string())));
    }

    let logs = base.join("logs");
    create_dir(&logs)?;
    for name in LOG_FILES {
        let file = logs.join(name);
        if !file.exists() {
            fs::write(&file, "")
                .with_context(|| format!("Failed to create file: {}", file.display()))?;
            success(&format!("Created file: {}", bold(&file.display().to_string())));
        }
    }

    create_dir(&base.join("database"))?;
    Ok(())
}

/// Write the wizard answers, saving after each group
pub fn store_answers<S: DiagnosticSink>(
    store: &mut ConfigStore<S>,
    owner: &str,
    database: &DatabaseAnswers,
    server: &ServerAnswers,
) -> crate::error::Result<()> {
    let owner = owner.trim();
    if !owner.is_empty() && !store.get_list(ListField::Owner).iter().any(|id| id == owner) {
        store.push_list(ListField::Owner, owner);
    }

    let db_host = non_empty_or(&database.host, DEFAULT_DB_HOST);
    let db_port = non_empty_or(&database.port, DEFAULT_DB_PORT);
    store.set("database", "host", &db_host);
    store.set("database", "port", &db_port);
    store.set("database", "user", &database.user);
    store.set("database", "password", &database.password);
    store.save()?;

    store.set("server", "host", &server.host);
    store.set("server", "port", &server.port);
    store.set("server", "login", &server.login);
    store.set("server", "password", &server.password);
    store.save()
}

fn non_empty_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn prompt(theme: &ColorfulTheme, message: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?)
}

/// True if `<program> --version` runs successfully
fn check_requirement(program: &str) -> bool {
    print!("  {} Checking for {}... ", "→".blue(), program);
    let found = Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);

    if found {
        println!("{}", "installed".green());
    } else {
        println!("{}", "not found".red());
        tracing::debug!(program, "requirement missing from PATH");
    }
    found
}

fn create_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        success(&format!("Created directory: {}", bold(&path.display().to_string())));
    }
    Ok(())
}
