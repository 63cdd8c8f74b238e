//! Config command implementation.
//!
//! Manages persisted CLI defaults.

use std::path::PathBuf;

use anyhow::Result;
use lagdelta_core::validate_identifier;

use crate::config::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("Lagdelta Configuration");
    println!("{:-<40}", "");
    println!("Frame:   {}", config.frame);
    println!(
        "Catalog: {}",
        config
            .catalog
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".to_string())
    );

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "frame" => {
            validate_identifier(value)?;
            config.frame = value.to_string();
            println!("Set frame to: {}", value);
        }
        "catalog" => {
            if value.is_empty() || value == "builtin" {
                config.catalog = None;
                println!("Using built-in catalog");
            } else {
                config.catalog = Some(PathBuf::from(value));
                println!("Set catalog to: {}", value);
            }
        }
        _ => {
            anyhow::bail!("Unknown config key: {}. Valid keys: frame, catalog", key);
        }
    }

    config.save()?;
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    let value = match key {
        "frame" => config.frame.clone(),
        "catalog" => config
            .catalog
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".to_string()),
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    };

    println!("{}", value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    Config::default().save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
