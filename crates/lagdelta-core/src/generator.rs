//! dplyr statement generation.
//!
//! Each feature `F` becomes one line:
//!
//! ```text
//! test <- test %>% mutate(F_DELTA = abs(F - lag(F)))
//! ```
//!
//! The frame name and the receiving column are configurable; the defaults
//! produce exactly the line above.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use askama::Template;
use tracing::{debug, info};

use crate::catalog::FeatureCatalog;
use crate::error::{GenError, GenResult};
use crate::feature::{validate_identifier, FeatureName};

/// Default R variable holding the data frame.
pub const DEFAULT_FRAME: &str = "test";

/// Which derived column receives the absolute delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeltaColumn {
    /// `<F>_DELTA`
    #[default]
    Delta,
    /// `<F>_ABS_DELTA`
    AbsDelta,
}

impl DeltaColumn {
    pub fn column_for(&self, name: &FeatureName) -> String {
        match self {
            Self::Delta => name.delta_column(),
            Self::AbsDelta => name.abs_delta_column(),
        }
    }
}

impl FromStr for DeltaColumn {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delta" => Ok(Self::Delta),
            "abs-delta" | "abs_delta" | "absdelta" => Ok(Self::AbsDelta),
            _ => Err(GenError::UnknownColumn(s.to_string())),
        }
    }
}

impl fmt::Display for DeltaColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delta => f.write_str("delta"),
            Self::AbsDelta => f.write_str("abs-delta"),
        }
    }
}

/// Askama template for a single statement.
#[derive(Template)]
#[template(path = "delta_statement.R", escape = "none")]
struct DeltaStatementTemplate<'a> {
    frame: &'a str,
    target: &'a str,
    feature: &'a str,
}

/// Renders delta statements for a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    frame: String,
    column: DeltaColumn,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            frame: DEFAULT_FRAME.to_string(),
            column: DeltaColumn::Delta,
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different frame variable. The name must be a plain identifier.
    pub fn with_frame(mut self, frame: impl Into<String>) -> GenResult<Self> {
        let frame = frame.into();
        validate_identifier(&frame)?;
        self.frame = frame;
        Ok(self)
    }

    pub fn with_column(mut self, column: DeltaColumn) -> Self {
        self.column = column;
        self
    }

    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn column(&self) -> DeltaColumn {
        self.column
    }

    /// Render the statement for one feature, without a line terminator.
    pub fn statement(&self, name: &FeatureName) -> GenResult<String> {
        let target = self.column.column_for(name);
        let template = DeltaStatementTemplate {
            frame: &self.frame,
            target: &target,
            feature: name.as_str(),
        };
        Ok(template.render()?)
    }

    /// Render every statement in catalog order.
    pub fn render(&self, catalog: &FeatureCatalog) -> GenResult<Vec<String>> {
        catalog.names().map(|name| self.statement(name)).collect()
    }

    /// Write one line per feature to `writer`. Returns the number of lines.
    pub fn write_to<W: Write>(&self, catalog: &FeatureCatalog, writer: &mut W) -> GenResult<usize> {
        debug!(
            frame = %self.frame,
            column = %self.column,
            features = catalog.len(),
            "Generating delta statements"
        );

        let mut written = 0;
        for name in catalog.names() {
            let line = self.statement(name)?;
            writeln!(writer, "{}", line)?;
            written += 1;
        }
        writer.flush()?;

        info!(lines = written, "Generated delta statements");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FeatureName {
        FeatureName::new(s).unwrap()
    }

    #[test]
    fn test_default_statement() {
        let generator = Generator::new();
        assert_eq!(
            generator.statement(&name("LEVEL_T1")).unwrap(),
            "test <- test %>% mutate(LEVEL_T1_DELTA = abs(LEVEL_T1 - lag(LEVEL_T1)))"
        );
    }

    #[test]
    fn test_statement_preserves_case() {
        let generator = Generator::new();
        assert_eq!(
            generator.statement(&name("flow.Pu3")).unwrap(),
            "test <- test %>% mutate(flow.Pu3_DELTA = abs(flow.Pu3 - lag(flow.Pu3)))"
        );
    }

    #[test]
    fn test_custom_frame_and_column() {
        let generator = Generator::new()
            .with_frame("train")
            .unwrap()
            .with_column(DeltaColumn::AbsDelta);
        assert_eq!(
            generator.statement(&name("FLOW_V2")).unwrap(),
            "train <- train %>% mutate(FLOW_V2_ABS_DELTA = abs(FLOW_V2 - lag(FLOW_V2)))"
        );
    }

    #[test]
    fn test_rejects_unsafe_frame() {
        assert!(Generator::new().with_frame("my frame").is_err());
        assert!(Generator::new().with_frame("").is_err());
    }

    #[test]
    fn test_column_parse() {
        assert_eq!("delta".parse::<DeltaColumn>().unwrap(), DeltaColumn::Delta);
        assert_eq!(
            "ABS-DELTA".parse::<DeltaColumn>().unwrap(),
            DeltaColumn::AbsDelta
        );
        assert!("ratio".parse::<DeltaColumn>().is_err());
    }

    #[test]
    fn test_write_to_terminates_each_line() {
        let catalog = FeatureCatalog::from_names(["LEVEL_T1", "FLOW_V2"]).unwrap();
        let mut buf = Vec::new();
        let written = Generator::new().write_to(&catalog, &mut buf).unwrap();

        assert_eq!(written, 2);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "test <- test %>% mutate(LEVEL_T1_DELTA = abs(LEVEL_T1 - lag(LEVEL_T1)))\n\
             test <- test %>% mutate(FLOW_V2_DELTA = abs(FLOW_V2 - lag(FLOW_V2)))\n"
        );
    }

    #[test]
    fn test_empty_catalog_writes_nothing() {
        let mut buf = Vec::new();
        let written = Generator::new()
            .write_to(&FeatureCatalog::default(), &mut buf)
            .unwrap();
        assert_eq!(written, 0);
        assert!(buf.is_empty());
    }
}
