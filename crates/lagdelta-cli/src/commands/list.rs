//! List command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use lagdelta_core::Feature;

use crate::config::Config;

/// Print each feature with its category, tab separated or as JSON.
///
/// With `verbose`, a per-category summary goes to stderr.
pub fn execute(
    config: &Config,
    catalog: Option<PathBuf>,
    categories: &[String],
    json: bool,
    verbose: bool,
) -> Result<()> {
    let catalog = super::resolve_catalog(config, catalog, categories)?;

    if json {
        let features: Vec<&Feature> = catalog.iter().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&features)
                .context("Failed to serialize catalog to JSON")?
        );
    } else {
        for feature in &catalog {
            println!("{}\t{}", feature.name, feature.category);
        }
    }

    if verbose {
        eprintln!("{} features", catalog.len());
        for (category, count) in catalog.category_counts() {
            if count > 0 {
                eprintln!("  {:<10}{}", category, count);
            }
        }
    }

    Ok(())
}
