//! Benchmark result analysis for dgemm performance charts.
//!
//! Reads Google Benchmark JSON result files, extracts one aggregate kind
//! (mean, median, ...) per file, aligns series by matrix size to compute
//! throughput ratios, and assembles absolute, ratio and run-to-run change
//! charts for table or JSON output.

pub mod align;
pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod naming;
pub mod output;
pub mod record;
pub mod verbose;

pub use align::ratio;
pub use chart::{Chart, ChartSeries, ChartSink, SkippedSource, assemble, render};
pub use config::{ChartConfig, ChartKind, Role, SourceSpec};
pub use error::{
    ConfigError, DegenerateReferenceError, DocumentReadError, MissingCounterError, SourceError,
};
pub use loader::{DirectoryLoader, SourceLoader, extract, load_document};
pub use naming::reference_name;
pub use record::{BenchmarkDocument, BenchmarkRecord, Measurement, RatioSeries, RecordSeries};
