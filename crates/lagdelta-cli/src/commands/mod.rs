//! CLI command implementations.

pub mod config;
pub mod generate;
pub mod list;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lagdelta_core::{FeatureCatalog, FeatureCategory};
use tracing::debug;

use crate::config::Config;

/// Resolve the catalog to operate on and apply category filters.
///
/// An explicit path wins over the configured one; with neither, the built-in
/// sensor list is used.
pub fn resolve_catalog(
    config: &Config,
    catalog: Option<PathBuf>,
    categories: &[String],
) -> Result<FeatureCatalog> {
    let categories = categories
        .iter()
        .map(|c| c.parse::<FeatureCategory>())
        .collect::<Result<HashSet<_>, _>>()?;

    let catalog = match catalog.or_else(|| config.catalog.clone()) {
        Some(path) => FeatureCatalog::load(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => {
            debug!("Using built-in feature catalog");
            FeatureCatalog::builtin()
        }
    };

    Ok(catalog.filter(&categories))
}
