//! Chart configuration.
//!
//! Deserialized from a chart TOML file, for example:
//!
//! ```toml
//! kind = "ratio"
//! aggregate = "median"
//! data-dir = "../bench_result/data"
//!
//! [[sources]]
//! source-id = "dgemm-mkl.json"
//! display-label = "MKL"
//!
//! [[sources]]
//! source-id = "dgemm-blast-static-panel.json"
//! display-label = "BLAST (SP)"
//! role = "reference"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Aggregate kind extracted when the file does not name one.
pub const DEFAULT_AGGREGATE: &str = "mean";

/// Absolute throughput is divided by this unless overridden (Giga).
pub const DEFAULT_FACTOR: f64 = 1e9;

/// Which comparison a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Throughput per source, scaled by the chart factor.
    Absolute,
    /// Each subject divided by each reference-role source.
    Ratio,
    /// Each subject divided by its own stored previous run.
    Change,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Absolute => "absolute",
            Self::Ratio => "ratio",
            Self::Change => "change",
        })
    }
}

impl ChartKind {
    /// Heading for the value column of a chart of this kind.
    pub fn value_label(self) -> &'static str {
        match self {
            Self::Absolute => "Throughput",
            Self::Ratio | Self::Change => "Ratio",
        }
    }
}

/// Part a source plays in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A series being evaluated.
    #[default]
    Subject,
    /// A baseline that subjects are divided by.
    Reference,
}

/// One configured data source.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceSpec {
    /// File name of the benchmark document, relative to the data directory.
    pub source_id: String,
    /// Series label shown in the chart.
    pub display_label: String,
    /// Subject or reference.
    #[serde(default)]
    pub role: Role,
}

impl SourceSpec {
    /// A subject source.
    pub fn subject(source_id: impl Into<String>, display_label: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            display_label: display_label.into(),
            role: Role::Subject,
        }
    }

    /// A reference source.
    pub fn reference(source_id: impl Into<String>, display_label: impl Into<String>) -> Self {
        Self {
            role: Role::Reference,
            ..Self::subject(source_id, display_label)
        }
    }
}

/// A complete chart description.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChartConfig {
    /// Chart kind.
    pub kind: ChartKind,
    /// Aggregate kind to extract from each document.
    #[serde(default = "default_aggregate")]
    pub aggregate: String,
    /// Directory holding the benchmark documents. Relative paths are
    /// resolved against the configuration file's directory by [`Self::load`].
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Divisor for absolute throughput.
    #[serde(default)]
    pub factor: Option<f64>,
    /// Sources in plotting order.
    pub sources: Vec<SourceSpec>,
}

fn default_aggregate() -> String {
    DEFAULT_AGGREGATE.to_string()
}

impl ChartConfig {
    /// Create an empty chart of `kind` extracting `aggregate`.
    pub fn new(kind: ChartKind, aggregate: impl Into<String>) -> Self {
        Self {
            kind,
            aggregate: aggregate.into(),
            data_dir: None,
            factor: None,
            sources: Vec::new(),
        }
    }

    /// Append a source.
    #[must_use]
    pub fn with_source(mut self, source: SourceSpec) -> Self {
        self.sources.push(source);
        self
    }

    /// Read, parse and validate a chart file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.data_dir = Some(match config.data_dir.take() {
            Some(dir) if dir.is_relative() => base.join(dir),
            Some(dir) => dir,
            None => base.to_path_buf(),
        });
        Ok(config)
    }

    /// Parse and validate a chart description from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the chart can be assembled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aggregate.trim().is_empty() {
            return Err(ConfigError::Invalid("aggregate must not be empty".into()));
        }
        if let Some(factor) = self.factor.filter(|f| !(f.is_finite() && *f > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "factor must be a positive number, got {factor}"
            )));
        }
        if let Some(bad) = self.sources.iter().find(|s| s.source_id.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "source '{}' has an empty source-id",
                bad.display_label
            )));
        }
        if self.subjects().next().is_none() {
            return Err(ConfigError::Invalid("no subject sources configured".into()));
        }

        let references = self.references().count();
        match self.kind {
            ChartKind::Ratio if references == 0 => Err(ConfigError::Invalid(
                "ratio chart needs at least one source with role = \"reference\"".into(),
            )),
            ChartKind::Absolute | ChartKind::Change if references > 0 => {
                Err(ConfigError::Invalid(format!(
                    "{} chart does not take reference sources",
                    self.kind
                )))
            }
            _ => Ok(()),
        }
    }

    /// Subject sources in configuration order.
    pub fn subjects(&self) -> impl Iterator<Item = &SourceSpec> {
        self.sources.iter().filter(|s| s.role == Role::Subject)
    }

    /// Reference sources in configuration order.
    pub fn references(&self) -> impl Iterator<Item = &SourceSpec> {
        self.sources.iter().filter(|s| s.role == Role::Reference)
    }

    /// Divisor for absolute throughput.
    pub fn factor(&self) -> f64 {
        self.factor.unwrap_or(DEFAULT_FACTOR)
    }

    /// Data directory, or the current directory when none was set.
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}
