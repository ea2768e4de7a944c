//! Error types for benchmark loading, alignment and chart configuration.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A benchmark document could not be read or parsed.
#[derive(Debug)]
pub enum DocumentReadError {
    /// The document does not exist.
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Any other I/O failure while opening or reading the document.
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The document is not valid benchmark JSON.
    Parse {
        /// Path being parsed.
        path: PathBuf,
        /// Underlying JSON error (carries line and column).
        source: serde_json::Error,
    },
}

impl DocumentReadError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    /// Path of the document that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. } | Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }

    /// Returns `true` if the document was simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for DocumentReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path, .. } => write!(f, "{}: no such file", path.display()),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "{}: invalid benchmark JSON: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DocumentReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { source, .. } | Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// A matched reference point has zero throughput, so no ratio exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateReferenceError {
    /// Matrix size at which the reference throughput is zero.
    pub size: u64,
}

impl fmt::Display for DegenerateReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reference throughput is zero at size {}", self.size)
    }
}

impl std::error::Error for DegenerateReferenceError {}

/// A selected record lacks the `m` or `flops` counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCounterError {
    /// Position of the record in the document, once known.
    pub index: Option<usize>,
    /// Benchmark name of the record, if it has one.
    pub name: Option<String>,
    /// JSON name of the missing counter.
    pub counter: &'static str,
}

impl fmt::Display for MissingCounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("benchmark entry")?;
        if let Some(index) = self.index {
            write!(f, " #{index}")?;
        }
        if let Some(ref name) = self.name {
            write!(f, " ({name})")?;
        }
        write!(f, " has no '{}' counter", self.counter)
    }
}

impl std::error::Error for MissingCounterError {}

/// Why a configured data source produced no series.
#[derive(Debug)]
pub enum SourceError {
    /// The source document (or its reference document) could not be read.
    Read(DocumentReadError),
    /// A record tagged with the requested aggregate is incomplete.
    Record {
        /// Identifier of the document holding the record.
        source_id: String,
        /// The missing counter.
        error: MissingCounterError,
    },
    /// The reference series has a zero-throughput point matching the subject.
    Degenerate {
        /// Identifier of the reference source.
        reference: String,
        /// Offending point.
        error: DegenerateReferenceError,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "{e}"),
            Self::Record { source_id, error } => write!(f, "{source_id}: {error}"),
            Self::Degenerate { reference, error } => write!(f, "{reference}: {error}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Record { error, .. } => Some(error),
            Self::Degenerate { error, .. } => Some(error),
        }
    }
}

impl From<DocumentReadError> for SourceError {
    fn from(e: DocumentReadError) -> Self {
        Self::Read(e)
    }
}

/// Errors loading or validating a chart configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The configuration file is not valid TOML for a chart.
    Parse(toml::de::Error),
    /// The configuration parsed but describes an unusable chart.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Parse(e) => write!(f, "chart config parse error: {e}"),
            Self::Invalid(msg) => write!(f, "invalid chart config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}
