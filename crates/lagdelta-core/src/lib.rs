//! Lagdelta core
//!
//! Turns an ordered catalog of sensor features into dplyr statements that add
//! an absolute lag-delta column per feature.
//!
//! ## Usage
//!
//! ```rust
//! use lagdelta_core::{FeatureCatalog, Generator};
//!
//! let catalog = FeatureCatalog::from_names(["LEVEL_T1", "FLOW_V2"]).unwrap();
//! let lines = Generator::new().render(&catalog).unwrap();
//!
//! assert_eq!(
//!     lines[0],
//!     "test <- test %>% mutate(LEVEL_T1_DELTA = abs(LEVEL_T1 - lag(LEVEL_T1)))"
//! );
//! ```

mod catalog;
mod error;
mod feature;
mod generator;

pub use catalog::{FeatureCatalog, BUILTIN_FEATURES};
pub use error::{GenError, GenResult};
pub use feature::{validate_identifier, Feature, FeatureCategory, FeatureName};
pub use generator::{DeltaColumn, Generator, DEFAULT_FRAME};
