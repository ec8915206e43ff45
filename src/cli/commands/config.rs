//! `cit config` command - Configuration management
//!
//! Settings come from, lowest priority first: the global user config, the
//! nearest `.cit/config.yaml`, then `CIT_*` environment variables.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{CONFIG_FILE, KEYS, LOCAL_DIR};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        if !KEYS.iter().any(|(k, _)| *k == key.as_str()) {
            return Err(miette::miette!(
                "Unknown key '{}'. Run `cit config keys` for the list",
                key
            ));
        }
        return match config.get(key) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    if global.format == OutputFormat::Json {
        let values: serde_json::Map<String, serde_json::Value> = KEYS
            .iter()
            .filter_map(|(k, _)| config.get(k).map(|v| (k.to_string(), v.into())))
            .collect();
        let json = serde_json::to_string_pretty(&values).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in KEYS {
        print_config_value(key, config.get(key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (CIT_STORE_URL, CIT_DB_TOKEN, CIT_PRODUCTS_TABLE, CIT_MAX_FILE_SIZE)");
    println!("  2. Local config ({}/{})", LOCAL_DIR, CONFIG_FILE);
    println!("  3. Global config (~/.config/cit/{})", CONFIG_FILE);

    Ok(())
}

fn print_config_value(key: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {:<16} {}", style(key).cyan(), v),
        None => println!("  {:<16} {}", style(key).cyan(), style("(not set)").dim()),
    }
}

fn run_path() -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(path) => print_path("Global:", &path),
        None => println!("  {} {}", style("Global:").cyan(), style("(no home directory)").dim()),
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    match Config::local_config_path(&cwd) {
        Some(path) => print_path("Local:", &path),
        None => println!(
            "  {}  {}",
            style("Local:").cyan(),
            style(format!("(no {}/{} found)", LOCAL_DIR, CONFIG_FILE)).dim()
        ),
    }

    Ok(())
}

fn print_path(label: &str, path: &Path) {
    println!("  {:<8} {}", style(label).cyan(), path.display());
    if path.exists() {
        println!("           {}", style("(exists)").green());
    } else {
        println!("           {}", style("(not created)").dim());
    }
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();
    for (key, description) in KEYS {
        println!("  {:<16} {}", style(key).cyan(), description);
    }
    Ok(())
}
