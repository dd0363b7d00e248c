//! `config init|show|validate` for module-console.json files.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use clap::Subcommand;
use colored::Colorize;

use crate::settings::{ModuleConsoleSettings, global_settings_path, load_merged, local_settings_path};

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a settings file with default values
    Init {
        /// Create the global file instead of ./module-console.json
        #[arg(long)]
        global: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the merged settings
    Show {
        /// Print only the merged JSON
        #[arg(long)]
        json: bool,

        /// Directory holding the local settings file (defaults to current dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Report advisory warnings for the merged settings
    Validate {
        /// Directory holding the local settings file (defaults to current dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn execute(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { global, force } => init(global, force),
        ConfigCommands::Show { json, path } => show(json, path),
        ConfigCommands::Validate { path } => validate(path),
    }
}

fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        let path = global_settings_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        path
    } else {
        local_settings_path(&std::env::current_dir()?)
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Settings file already exists: {}\nUse --force to overwrite",
            path.display()
        );
    }

    let json = serde_json::to_string_pretty(&ModuleConsoleSettings::default())?;
    AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(json.as_bytes()))
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    println!("{} Created {}", "OK".green(), path.display().to_string().cyan());
    Ok(())
}

fn show(json_only: bool, path: Option<PathBuf>) -> Result<()> {
    let dir = match path {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let loaded = load_merged(&dir)?;
    let json = serde_json::to_string_pretty(&loaded.settings)?;

    if json_only {
        println!("{json}");
        return Ok(());
    }

    println!("{}", "Settings files:".bold());
    for (label, file) in [("global", &loaded.paths.global), ("local", &loaded.paths.local)] {
        let state = if file.exists() { "found".green() } else { "missing".dimmed() };
        println!("  {label:<7} {} ({state})", file.display());
    }
    println!();
    println!("{json}");
    for warning in &loaded.warnings {
        eprintln!("{} {warning}", "WARN".yellow());
    }
    Ok(())
}

fn validate(path: Option<PathBuf>) -> Result<()> {
    let dir = match path {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let loaded = load_merged(&dir)?;
    if loaded.warnings.is_empty() {
        println!("{} Settings are valid", "OK".green());
        return Ok(());
    }
    for warning in &loaded.warnings {
        println!("{} {warning}", "WARN".yellow());
    }
    println!("{} warning(s)", loaded.warnings.len());
    Ok(())
}
