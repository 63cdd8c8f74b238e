//! Lagdelta CLI - print dplyr lag-delta statements for sensor features.
//!
//! Run `lagdelta` with no arguments to emit one statement per built-in sensor.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{config as config_cmd, generate::GenerateOptions};
use config::Config;

/// Lagdelta - generate dplyr delta columns for sensor features.
///
/// Each feature F becomes:
/// `test <- test %>% mutate(F_DELTA = abs(F - lag(F)))`
#[derive(Parser, Debug)]
#[command(
    name = "lagdelta",
    author,
    version,
    about = "Lagdelta: generate dplyr lag-delta statements for sensor features",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Catalog selection shared by commands that read features.
#[derive(Args, Debug)]
struct CatalogArgs {
    /// Feature catalog file (.toml or one name per line). Defaults to the built-in list.
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Only include features of this category (level, pressure, flow, other).
    /// Can be specified multiple times.
    #[arg(long = "category")]
    categories: Vec<String>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one statement per feature (default command).
    Generate {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Data frame variable name.
        #[arg(short, long)]
        frame: Option<String>,

        /// Receiving column: delta (F_DELTA) or abs-delta (F_ABS_DELTA).
        #[arg(long)]
        column: Option<String>,
    },

    /// List catalog features with their categories.
    List {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Print the features as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // -v / -q win; otherwise RUST_LOG, falling back to warnings only
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout carries generated code only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // A bare invocation is the fixed built-in generation: no environment,
    // .env or config file is consulted.
    let Some(command) = cli.command else {
        return commands::generate::execute(&Config::default(), GenerateOptions::default());
    };

    match command {
        Commands::Generate {
            catalog,
            frame,
            column,
        } => {
            let config = Config::load()?;
            commands::generate::execute(
                &config,
                GenerateOptions {
                    catalog: catalog.catalog,
                    categories: catalog.categories,
                    frame,
                    column,
                },
            )?;
        }

        Commands::List { catalog, json } => {
            let config = Config::load()?;
            commands::list::execute(
                &config,
                catalog.catalog,
                &catalog.categories,
                json,
                cli.verbose && !cli.quiet,
            )?;
        }

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => {
                config_cmd::show(&Config::load()?)?;
            }
            ConfigCommands::Set { key, value } => {
                // Edit the persisted layer only; env overrides must not leak to disk
                let mut config = Config::load_file()?;
                config_cmd::set(&mut config, &key, &value)?;
            }
            ConfigCommands::Get { key } => {
                config_cmd::get(&Config::load()?, &key)?;
            }
            ConfigCommands::Reset => {
                config_cmd::reset()?;
            }
            ConfigCommands::Path => {
                if let Some(path) = Config::config_file_path() {
                    println!("{}", path.display());
                } else {
                    println!("(no config file path available)");
                }
            }
        },
    }

    Ok(())
}
