//! Generate command implementation.
//!
//! Prints one dplyr statement per catalog feature to stdout.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lagdelta_core::{DeltaColumn, GenError, Generator};
use tracing::{debug, info};

use crate::config::Config;

/// Options accepted by `lagdelta generate`.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub catalog: Option<PathBuf>,
    pub categories: Vec<String>,
    pub frame: Option<String>,
    pub column: Option<String>,
}

/// Generate statements for the resolved catalog.
pub fn execute(config: &Config, options: GenerateOptions) -> Result<()> {
    let catalog = super::resolve_catalog(config, options.catalog, &options.categories)?;

    let column: DeltaColumn = match options.column {
        Some(column) => column.parse()?,
        None => DeltaColumn::default(),
    };
    let frame = options.frame.unwrap_or_else(|| config.frame.clone());
    let generator = Generator::new()
        .with_frame(frame.as_str())
        .with_context(|| format!("Invalid frame name: {:?}", frame))?
        .with_column(column);

    info!(
        features = catalog.len(),
        frame = %generator.frame(),
        "Generating statements"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match generator.write_to(&catalog, &mut handle) {
        Ok(_) => Ok(()),
        // Downstream closed the pipe (e.g. `| head`); nothing left to do.
        Err(GenError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed early");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to write statements"),
    }
}
