//! Benchmark document model and the series derived from it.
//!
//! Documents follow the JSON layout written by Google Benchmark with
//! `--benchmark_format=json`. User counters such as the matrix size `m` and
//! the throughput rate `flops` appear as plain fields on each entry.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MissingCounterError;

/// A parsed benchmark result file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarkDocument {
    /// Information about the machine and binary that produced the results.
    #[serde(default)]
    pub context: Option<BenchmarkContext>,
    /// Measurements in file order.
    pub benchmarks: Vec<BenchmarkRecord>,
}

/// Run context recorded at the top of a result file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarkContext {
    /// Local date and time of the run.
    pub date: Option<String>,
    /// Host that ran the benchmarks.
    pub host_name: Option<String>,
    /// Benchmark executable path.
    pub executable: Option<String>,
    /// Logical CPU count.
    pub num_cpus: Option<u64>,
    /// Nominal CPU clock in MHz.
    pub mhz_per_cpu: Option<u64>,
    /// `debug` or `release`.
    pub library_build_type: Option<String>,
}

/// One benchmark measurement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    /// Benchmark name, e.g. `BM_gemm/64_mean`.
    #[serde(default)]
    pub name: Option<String>,
    /// `iteration` or `aggregate`.
    #[serde(default)]
    pub run_type: Option<String>,
    /// Statistical summary tag (`mean`, `median`, `stddev`, ...). Absent on
    /// per-iteration records and on files from older benchmark versions.
    #[serde(rename = "aggregate_name", default)]
    pub aggregate_kind: Option<String>,
    /// Problem dimension. Absent on entries that do not set the counter,
    /// such as errored iterations and complexity fits.
    #[serde(rename = "m", default, deserialize_with = "deserialize_size")]
    pub size: Option<u64>,
    /// Operations per second.
    #[serde(rename = "flops", default)]
    pub throughput: Option<f64>,
}

impl BenchmarkRecord {
    /// The `(size, throughput)` point, if both counters are present.
    pub fn measurement(&self) -> Result<Measurement, MissingCounterError> {
        let missing = |counter| MissingCounterError {
            index: None,
            name: self.name.clone(),
            counter,
        };
        Ok(Measurement {
            size: self.size.ok_or_else(|| missing("m"))?,
            throughput: self.throughput.ok_or_else(|| missing("flops"))?,
        })
    }
}

/// Counters are emitted as doubles, so `64` and `64.0` are both accepted.
fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSize {
        Int(u64),
        Float(f64),
    }

    // 2^64 is exactly representable and would saturate in the cast.
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;

    match Option::<RawSize>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawSize::Int(n)) => Ok(Some(n)),
        Some(RawSize::Float(v)) if v >= 0.0 && v.fract() == 0.0 && v < LIMIT => {
            Ok(Some(v as u64))
        }
        Some(RawSize::Float(v)) => Err(serde::de::Error::custom(format!(
            "matrix size must be a non-negative integer, got {v}"
        ))),
    }
}

/// A single `(size, throughput)` point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Problem dimension.
    pub size: u64,
    /// Operations per second.
    pub throughput: f64,
}

/// Ordered measurements extracted from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSeries {
    /// Points in document order. Sizes may repeat.
    pub points: Vec<Measurement>,
}

impl RecordSeries {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.points.iter()
    }

    /// First point with the given size.
    pub fn find(&self, size: u64) -> Option<&Measurement> {
        self.points.iter().find(|p| p.size == size)
    }
}

impl FromIterator<Measurement> for RecordSeries {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSeries {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// A single `(size, subject / reference)` point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioPoint {
    /// Problem dimension shared by both series.
    pub size: u64,
    /// Subject throughput divided by reference throughput.
    pub ratio: f64,
}

/// Pointwise ratios in subject-series order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioSeries {
    /// Points in subject order.
    pub points: Vec<RatioPoint>,
}

impl RatioSeries {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RatioPoint> {
        self.points.iter()
    }
}
