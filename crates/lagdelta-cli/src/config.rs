//! CLI configuration management.
//!
//! Values are resolved from, highest precedence first: command-line flags,
//! environment variables (optionally from `.env`), the user config file, and
//! built-in defaults. Only the file layer is ever written back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use lagdelta_core::DEFAULT_FRAME;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable overriding the frame name.
pub const ENV_FRAME: &str = "LAGDELTA_FRAME";

/// Environment variable pointing at a catalog file.
pub const ENV_CATALOG: &str = "LAGDELTA_CATALOG";

/// Application-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// R variable holding the data frame.
    pub frame: String,

    /// Catalog file to use instead of the built-in sensor list.
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame: DEFAULT_FRAME.to_string(),
            catalog: None,
        }
    }
}

impl Config {
    /// Load the effective configuration: config file overlaid with the
    /// environment (including a `.env` file).
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env();
        Ok(config)
    }

    /// Load only what is persisted in the config file.
    ///
    /// A file that fails to parse is reported and replaced by defaults so
    /// that `config set` and `config reset` can still repair it.
    pub fn load_file() -> Result<Self> {
        let Some(config_path) = Self::config_file_path() else {
            return Ok(Self::default());
        };
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        Ok(Self::parse_or_default(&contents, &config_path))
    }

    fn parse_or_default(contents: &str, path: &Path) -> Self {
        match serde_json::from_str(contents) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded config file");
                config
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring unreadable config file, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Overlay environment variables. Never persisted.
    fn apply_env(&mut self) {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        if let Ok(frame) = std::env::var(ENV_FRAME) {
            self.frame = frame;
        }
        if let Ok(catalog) = std::env::var(ENV_CATALOG) {
            if !catalog.is_empty() {
                self.catalog = Some(PathBuf::from(catalog));
            }
        }
    }

    /// Save current configuration to the config file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()
            .context("No config directory available on this platform")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "lagdelta", "lagdelta")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
