//! Ordered feature catalogs.
//!
//! A catalog is the injectable list the generator walks. Order and duplicates
//! are preserved exactly as given. Catalogs come from the built-in sensor
//! list, from an in-memory list of names, or from a file:
//!
//! - `*.toml`: `[[feature]]` tables with `name` and optional `category`
//! - anything else: one name per line, blank lines and `#` comments ignored

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{GenError, GenResult};
use crate::feature::{Feature, FeatureCategory, FeatureName};

/// Sensor channels shipped with the tool, in output order.
pub const BUILTIN_FEATURES: &[&str] = &[
    "LEVEL_T1",
    "LEVEL_T2",
    "LEVEL_T3",
    "LEVEL_T4",
    "LEVEL_T5",
    "LEVEL_T6",
    "LEVEL_T7",
    "PRESSURE_J280",
    "PRESSURE_J269",
    "PRESSURE_J300",
    "PRESSURE_J256",
    "PRESSURE_J289",
    "PRESSURE_J415",
    "PRESSURE_J302",
    "PRESSURE_J306",
    "PRESSURE_J307",
    "PRESSURE_J317",
    "PRESSURE_J14",
    "PRESSURE_J422",
    "FLOW_PU1",
    "FLOW_PU2",
    "FLOW_PU3",
    "FLOW_PU4",
    "FLOW_PU5",
    "FLOW_PU6",
    "FLOW_PU7",
    "FLOW_PU8",
    "FLOW_PU9",
    "FLOW_PU10",
    "FLOW_PU11",
    "FLOW_V2",
];

/// An ordered sequence of features.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
}

/// On-disk TOML layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    feature: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    #[serde(default)]
    category: Option<String>,
}

impl FeatureCatalog {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// The built-in water-network sensor catalog.
    pub fn builtin() -> Self {
        Self {
            features: BUILTIN_FEATURES
                .iter()
                .copied()
                .map(|name| Feature::inferred(FeatureName::from_static(name)))
                .collect(),
        }
    }

    /// Build a catalog from raw names, inferring categories.
    ///
    /// Fails on the first invalid name; nothing is kept in that case.
    pub fn from_names<I, S>(names: I) -> GenResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let features = names
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                let raw = raw.as_ref();
                FeatureName::new(raw)
                    .map(Feature::inferred)
                    .map_err(|e| GenError::at_entry(idx + 1, raw, e))
            })
            .collect::<GenResult<Vec<_>>>()?;

        Ok(Self { features })
    }

    /// Load a catalog file. The format is picked from the extension.
    pub fn load(path: &Path) -> GenResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GenError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let catalog = if is_toml {
            Self::from_toml_str(&content).map_err(|e| match e {
                GenError::CatalogParse { message, .. } => GenError::CatalogParse {
                    path: path.to_path_buf(),
                    message,
                },
                other => other,
            })?
        } else {
            Self::from_list_str(&content)?
        };

        info!(path = %path.display(), features = catalog.len(), "Loaded feature catalog");
        Ok(catalog)
    }

    /// Parse the plain list format.
    pub fn from_list_str(content: &str) -> GenResult<Self> {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        Self::from_names(names)
    }

    /// Parse the TOML format.
    pub fn from_toml_str(content: &str) -> GenResult<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| GenError::CatalogParse {
            path: Default::default(),
            message: e.to_string(),
        })?;

        let features = file
            .feature
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| {
                let position = idx + 1;
                let name = FeatureName::new(entry.name.as_str())
                    .map_err(|e| GenError::at_entry(position, entry.name.as_str(), e))?;
                let category = match entry.category.as_deref() {
                    Some(tag) => tag
                        .parse::<FeatureCategory>()
                        .map_err(|e| GenError::at_entry(position, entry.name.as_str(), e))?,
                    None => FeatureCategory::infer(name.as_str()),
                };
                Ok::<_, GenError>(Feature::new(name, category))
            })
            .collect::<GenResult<Vec<_>>>()?;

        Ok(Self { features })
    }

    /// Keep only features in `categories`. An empty set keeps everything.
    pub fn filter(&self, categories: &HashSet<FeatureCategory>) -> Self {
        if categories.is_empty() {
            return self.clone();
        }

        let features: Vec<Feature> = self
            .features
            .iter()
            .filter(|f| categories.contains(&f.category))
            .cloned()
            .collect();

        debug!(
            before = self.features.len(),
            after = features.len(),
            "Filtered catalog by category"
        );
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Feature names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &FeatureName> {
        self.features.iter().map(|f| &f.name)
    }

    /// Count features per category, in `FeatureCategory::ALL` order.
    pub fn category_counts(&self) -> Vec<(FeatureCategory, usize)> {
        FeatureCategory::ALL
            .iter()
            .map(|cat| (*cat, self.features.iter().filter(|f| f.category == *cat).count()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FeatureCatalog {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
