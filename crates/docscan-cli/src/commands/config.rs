//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use docscan_core::models::config::DocscanConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "scan.default_mode")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // The global --config flag points every subcommand at another file
    let target = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&target),
        ConfigCommand::Init(init_args) => init_config(init_args, target),
        ConfigCommand::Get { key } => get_config(&target, &key),
        ConfigCommand::Set { key, value } => set_config(&target, &key, &value),
        ConfigCommand::Path => show_path(&target, config_path.is_some()),
    }
}

/// Config file location; `DOCSCAN_CONFIG_DIR` overrides the platform directory.
pub fn default_config_path() -> PathBuf {
    std::env::var_os("DOCSCAN_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("docscan")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocscanConfig> {
    if let Some(path) = config_path {
        return DocscanConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(DocscanConfig::from_file(&default_path)?)
    } else {
        Ok(DocscanConfig::default())
    }
}

/// Read `path` for editing; a missing file reads as the defaults.
fn read_or_default(path: &Path) -> anyhow::Result<Option<DocscanConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    DocscanConfig::from_file(path)
        .map(Some)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    let config = match read_or_default(path)? {
        Some(config) => config,
        None => {
            println!(
                "{} No config file at {}, showing defaults.",
                style("ℹ").blue(),
                path.display()
            );
            DocscanConfig::default()
        }
    };

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, target: PathBuf) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or(target);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    DocscanConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

/// Walk a dotted key such as `scan.default_mode` down the JSON form of the config.
fn lookup<'a>(json: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = read_or_default(path)?.unwrap_or_default();

    let json = serde_json::to_value(&config)?;
    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = match read_or_default(path)? {
        Some(config) => config,
        None => {
            // Create parent directory if needed
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            DocscanConfig::default()
        }
    };

    // Bare words are taken as strings so `set scan.default_mode document` works
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let (section, field) = key
        .rsplit_once('.')
        .ok_or_else(|| anyhow::anyhow!("Expected a dotted key such as scan.default_mode: {}", key))?;

    // Edit the JSON form, then let serde check the new value
    let mut json = serde_json::to_value(&config)?;
    let slot = lookup_mut(&mut json, section)
        .and_then(|v| v.as_object_mut())
        .and_then(|obj| obj.get_mut(field))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    *slot = parsed_value.clone();

    let config: DocscanConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn lookup_mut<'a>(json: &'a mut serde_json::Value, key: &str) -> Option<&'a mut serde_json::Value> {
    key.split('.').try_fold(json, |current, part| current.get_mut(part))
}

fn show_path(path: &Path, explicit: bool) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        if explicit {
            println!(
                "Run 'docscan --config {} config init' to create it.",
                path.display()
            );
        } else {
            println!("Run 'docscan config init' to create a configuration file.");
        }
    }

    Ok(())
}
