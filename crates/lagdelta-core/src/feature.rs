//! Feature names and categories.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{GenError, GenResult};

/// Check that `name` can be substituted verbatim into a dplyr statement.
///
/// Accepted: ASCII letters, digits, `_` and `.`, starting with a letter or
/// with a `.` that is not followed by a digit.
pub fn validate_identifier(name: &str) -> GenResult<()> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(GenError::EmptyName)?;

    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '.'))
    {
        return Err(GenError::UnsafeName {
            name: name.to_string(),
            ch,
        });
    }

    let starts_ok = match first {
        c if c.is_ascii_alphabetic() => true,
        '.' => !chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    };
    if !starts_ok {
        return Err(GenError::InvalidStart {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// A validated sensor feature identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureName(String);

impl FeatureName {
    /// Validate and wrap a feature name.
    pub fn new(name: impl Into<String>) -> GenResult<Self> {
        let name = name.into();
        validate_identifier(&name)?;
        Ok(Self(name))
    }

    /// Wrap a name known at compile time to be valid.
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(validate_identifier(name).is_ok(), "invalid built-in name {name}");
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the signed delta column, `<F>_DELTA`.
    pub fn delta_column(&self) -> String {
        format!("{}_DELTA", self.0)
    }

    /// Name of the absolute delta column, `<F>_ABS_DELTA`.
    pub fn abs_delta_column(&self) -> String {
        format!("{}_ABS_DELTA", self.0)
    }
}

impl FromStr for FeatureName {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FeatureName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Measurement family a feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    /// Tank level.
    Level,
    /// Junction pressure.
    Pressure,
    /// Pump or valve flow.
    Flow,
    Other,
}

impl FeatureCategory {
    pub const ALL: [FeatureCategory; 4] = [
        FeatureCategory::Level,
        FeatureCategory::Pressure,
        FeatureCategory::Flow,
        FeatureCategory::Other,
    ];

    /// Infer a category from the name prefix before the first `_`.
    pub fn infer(name: &str) -> Self {
        let prefix = name.split('_').next().unwrap_or(name);
        match prefix.to_ascii_uppercase().as_str() {
            "LEVEL" => Self::Level,
            "PRESSURE" => Self::Pressure,
            "FLOW" => Self::Flow,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Pressure => "pressure",
            Self::Flow => "flow",
            Self::Other => "other",
        }
    }
}

impl FromStr for FeatureCategory {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "level" => Ok(Self::Level),
            "pressure" => Ok(Self::Pressure),
            "flow" => Ok(Self::Flow),
            "other" => Ok(Self::Other),
            _ => Err(GenError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A feature together with its category tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub name: FeatureName,
    pub category: FeatureCategory,
}

impl Feature {
    /// Create a feature with an explicit category.
    pub fn new(name: FeatureName, category: FeatureCategory) -> Self {
        Self { name, category }
    }

    /// Create a feature whose category is inferred from its name.
    pub fn inferred(name: FeatureName) -> Self {
        let category = FeatureCategory::infer(name.as_str());
        Self { name, category }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_sensor_names() {
        for name in ["LEVEL_T1", "PRESSURE_J422", "FLOW_PU10", "flow.v2", ".hidden"] {
            assert!(FeatureName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(matches!(FeatureName::new(""), Err(GenError::EmptyName)));
    }

    #[test]
    fn test_rejects_unsafe_characters() {
        let err = FeatureName::new("LEVEL\"T1").unwrap_err();
        assert!(matches!(err, GenError::UnsafeName { ch: '"', .. }));

        for name in ["LEVEL T1", "A-B", "x)", "FLOW'1", "ÄBC"] {
            assert!(
                matches!(FeatureName::new(name), Err(GenError::UnsafeName { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_bad_start() {
        for name in ["1LEVEL", "_LEVEL", ".9x"] {
            assert!(
                matches!(FeatureName::new(name), Err(GenError::InvalidStart { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_derived_columns() {
        let name = FeatureName::new("FLOW_V2").unwrap();
        assert_eq!(name.delta_column(), "FLOW_V2_DELTA");
        assert_eq!(name.abs_delta_column(), "FLOW_V2_ABS_DELTA");
    }

    #[test]
    fn test_category_inference() {
        assert_eq!(FeatureCategory::infer("LEVEL_T3"), FeatureCategory::Level);
        assert_eq!(
            FeatureCategory::infer("PRESSURE_J14"),
            FeatureCategory::Pressure
        );
        assert_eq!(FeatureCategory::infer("FLOW_PU1"), FeatureCategory::Flow);
        assert_eq!(FeatureCategory::infer("flow_pu1"), FeatureCategory::Flow);
        assert_eq!(FeatureCategory::infer("TEMP_A"), FeatureCategory::Other);
        assert_eq!(FeatureCategory::infer("LEVELT1"), FeatureCategory::Other);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Pressure".parse::<FeatureCategory>().unwrap(), FeatureCategory::Pressure);
        assert!(matches!(
            "temperature".parse::<FeatureCategory>(),
            Err(GenError::UnknownCategory(_))
        ));
    }
}
