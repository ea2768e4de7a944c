//! Chart output: terminal tables and JSON chart data.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::chart::{ChartSink, SkippedSource};
use crate::config::ChartKind;
use crate::record::{BenchmarkContext, RecordSeries};

/// Prints each series as an aligned two-column table.
pub struct TableSink<W: Write> {
    out: W,
    value_header: &'static str,
    skipped: usize,
}

impl TableSink<io::Stdout> {
    /// Table output on stdout.
    pub fn stdout(kind: ChartKind) -> Self {
        Self::new(io::stdout(), kind)
    }
}

impl<W: Write> TableSink<W> {
    /// Table output on `out`.
    pub fn new(out: W, kind: ChartKind) -> Self {
        Self {
            out,
            value_header: kind.value_label(),
            skipped: 0,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartSink for TableSink<W> {
    fn series(&mut self, label: &str, points: &[(f64, f64)]) -> Result<()> {
        let rows: Vec<(String, String)> = points
            .iter()
            .map(|(x, y)| (format!("{x}"), format!("{y:.4}")))
            .collect();
        write_table(&mut self.out, label, self.value_header, &rows)?;
        Ok(())
    }

    fn skipped(&mut self, skipped: &SkippedSource) -> Result<()> {
        if self.skipped == 0 {
            writeln!(self.out)?;
        }
        self.skipped += 1;
        writeln!(
            self.out,
            "  Skipping {} ({}): {}",
            skipped.label, skipped.source_id, skipped.reason
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.skipped > 0 {
            writeln!(self.out, "\n  {} source(s) skipped.", self.skipped)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Print one labelled table of preformatted `(size, value)` rows.
fn write_table<W: Write>(
    out: &mut W,
    label: &str,
    value_header: &str,
    rows: &[(String, String)],
) -> io::Result<()> {
    let size_width = rows
        .iter()
        .map(|(size, _)| size.len())
        .max()
        .unwrap_or(0)
        .max(4);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.len())
        .max()
        .unwrap_or(0)
        .max(value_header.len());

    writeln!(out)?;
    writeln!(out, "  {label}")?;
    writeln!(
        out,
        "  {:>size_width$}  {:>value_width$}",
        "Size", value_header
    )?;
    writeln!(out, "  {:->size_width$}  {:->value_width$}", "", "")?;

    if rows.is_empty() {
        writeln!(out, "  (no points)")?;
    }
    for (size, value) in rows {
        writeln!(out, "  {size:>size_width$}  {value:>value_width$}")?;
    }
    Ok(())
}

/// Print the measurements of one extracted series, unscaled.
pub fn write_measurements<W: Write>(
    out: &mut W,
    label: &str,
    series: &RecordSeries,
) -> io::Result<()> {
    let rows: Vec<(String, String)> = series
        .iter()
        .map(|p| (p.size.to_string(), format!("{:.4e}", p.throughput)))
        .collect();
    write_table(out, label, "Throughput", &rows)
}

/// Print the run context block of a benchmark document.
pub fn write_context<W: Write>(out: &mut W, context: &BenchmarkContext) -> io::Result<()> {
    let fields = [
        ("Date", context.date.clone()),
        ("Host", context.host_name.clone()),
        ("Executable", context.executable.clone()),
        ("CPUs", context.num_cpus.map(|n| n.to_string())),
        ("MHz per CPU", context.mhz_per_cpu.map(|n| n.to_string())),
        ("Build type", context.library_build_type.clone()),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            writeln!(out, "  {name:<12} {value}")?;
        }
    }
    Ok(())
}

/// Serialized form of an assembled chart, read by external plotting scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Chart kind.
    pub kind: ChartKind,
    /// Aggregate kind used for extraction.
    pub aggregate: String,
    /// Series in plotting order.
    pub series: Vec<SeriesData>,
    /// Sources that were not plotted.
    pub skipped: Vec<SkippedData>,
}

/// One serialized series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    /// Legend label.
    pub label: String,
    /// `[x, y]` pairs.
    pub points: Vec<(f64, f64)>,
}

/// One serialized skipped source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedData {
    /// Configured source identifier.
    pub source_id: String,
    /// Display label.
    pub label: String,
    /// Human-readable cause.
    pub reason: String,
}

/// Collects the chart and writes it as pretty JSON on `finish`.
pub struct JsonSink {
    path: PathBuf,
    data: ChartData,
}

impl JsonSink {
    /// Write chart data for a `kind` chart to `path`.
    pub fn new(path: impl Into<PathBuf>, kind: ChartKind, aggregate: &str) -> Self {
        Self {
            path: path.into(),
            data: ChartData {
                kind,
                aggregate: aggregate.to_string(),
                series: Vec::new(),
                skipped: Vec::new(),
            },
        }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSink for JsonSink {
    fn series(&mut self, label: &str, points: &[(f64, f64)]) -> Result<()> {
        self.data.series.push(SeriesData {
            label: label.to_string(),
            points: points.to_vec(),
        });
        Ok(())
    }

    fn skipped(&mut self, skipped: &SkippedSource) -> Result<()> {
        self.data.skipped.push(SkippedData {
            source_id: skipped.source_id.clone(),
            label: skipped.label.clone(),
            reason: skipped.reason.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.data).context("serializing chart data to JSON")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing chart data to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Measurement;

    #[test]
    fn table_lists_points() {
        let mut sink = TableSink::new(Vec::new(), ChartKind::Ratio);
        sink.series("MKL", &[(64.0, 0.5), (1024.0, 1.25)]).unwrap();
        sink.finish().unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert!(text.contains("  MKL\n"));
        assert!(text.contains("Ratio"));
        assert!(text.contains("    64  0.5000"));
        assert!(text.contains("  1024  1.2500"));
        assert!(!text.contains("skipped"));
    }

    #[test]
    fn empty_series_noted() {
        let mut sink = TableSink::new(Vec::new(), ChartKind::Absolute);
        sink.series("Empty", &[]).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("(no points)"));
    }

    #[test]
    fn measurements_table_uses_exponent_form() {
        let series: RecordSeries = [Measurement {
            size: 8,
            throughput: 1.6e10,
        }]
        .into_iter()
        .collect();
        let mut out = Vec::new();
        write_measurements(&mut out, "median", &series).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1.6000e10"));
    }

    #[test]
    fn context_skips_absent_fields() {
        let context = BenchmarkContext {
            host_name: Some("bench01".into()),
            num_cpus: Some(8),
            ..BenchmarkContext::default()
        };
        let mut out = Vec::new();
        write_context(&mut out, &context).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Host         bench01"));
        assert!(text.contains("CPUs         8"));
        assert!(!text.contains("Date"));
    }
}
