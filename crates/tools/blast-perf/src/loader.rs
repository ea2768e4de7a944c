//! Reading benchmark documents and extracting aggregate series.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{DocumentReadError, MissingCounterError};
use crate::record::{BenchmarkDocument, RecordSeries};

/// Extract the records tagged with `aggregate_kind`, in document order.
///
/// Records without an aggregate tag, or tagged with another kind, are
/// skipped rather than rejected, and their counters are never looked at.
/// Per-iteration entries, errored runs and complexity fits all fall in this
/// group. A selected record without both `m` and `flops` is an error.
pub fn extract(
    document: &BenchmarkDocument,
    aggregate_kind: &str,
) -> Result<RecordSeries, MissingCounterError> {
    document
        .benchmarks
        .iter()
        .enumerate()
        .filter(|(_, record)| record.aggregate_kind.as_deref() == Some(aggregate_kind))
        .map(|(index, record)| {
            record
                .measurement()
                .map_err(|e| MissingCounterError {
                    index: Some(index),
                    ..e
                })
        })
        .collect()
}

/// Parse a benchmark document from JSON text.
pub fn parse_document(text: &str) -> Result<BenchmarkDocument, serde_json::Error> {
    serde_json::from_str(text)
}

/// Open, parse and close the benchmark document at `path`.
pub fn load_document(path: &Path) -> Result<BenchmarkDocument, DocumentReadError> {
    let file = File::open(path).map_err(|e| DocumentReadError::from_io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            DocumentReadError::Io {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            DocumentReadError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Resolves a configured source identifier to a benchmark document.
pub trait SourceLoader {
    /// Load the document named by `source_id`.
    fn load(&self, source_id: &str) -> Result<BenchmarkDocument, DocumentReadError>;
}

/// Loads sources as files under a data directory.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    data_dir: PathBuf,
}

impl DirectoryLoader {
    /// Create a loader rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory sources are resolved against.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path for a source identifier.
    pub fn path_for(&self, source_id: &str) -> PathBuf {
        self.data_dir.join(source_id)
    }
}

impl SourceLoader for DirectoryLoader {
    fn load(&self, source_id: &str) -> Result<BenchmarkDocument, DocumentReadError> {
        let path = self.path_for(source_id);
        crate::vprintln!("  reading {}", path.display());
        load_document(&path)
    }
}
