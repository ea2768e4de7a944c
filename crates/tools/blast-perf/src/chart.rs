//! Chart assembly: turn a [`ChartConfig`] into finished series.
//!
//! Each configured source is loaded, filtered to the configured aggregate
//! and, for ratio and change charts, divided by its reference. A source that
//! fails is recorded in [`Chart::skipped`] and the remaining sources are
//! still processed.

use anyhow::Result;

use crate::align;
use crate::config::{ChartConfig, ChartKind, SourceSpec};
use crate::error::SourceError;
use crate::loader::{self, SourceLoader};
use crate::naming::reference_name;
use crate::record::{RatioSeries, RecordSeries};
use crate::verbose::Timer;
use crate::{dprintln, vprintln};

/// One finished curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Legend label.
    pub label: String,
    /// `(x, y)` points in plotting order.
    pub points: Vec<(f64, f64)>,
}

/// A source that produced no series, and why.
#[derive(Debug)]
pub struct SkippedSource {
    /// Identifier of the configured source.
    pub source_id: String,
    /// Its display label.
    pub label: String,
    /// Cause of the skip.
    pub reason: SourceError,
}

/// Assembled chart data.
#[derive(Debug)]
pub struct Chart {
    /// Kind of comparison.
    pub kind: ChartKind,
    /// Aggregate kind the series were extracted with.
    pub aggregate: String,
    /// Finished series in configuration order.
    pub series: Vec<ChartSeries>,
    /// Sources that could not be plotted.
    pub skipped: Vec<SkippedSource>,
}

impl Chart {
    fn new(config: &ChartConfig) -> Self {
        Self {
            kind: config.kind,
            aggregate: config.aggregate.clone(),
            series: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, source: &SourceSpec, reason: impl Into<SourceError>) {
        self.skipped.push(SkippedSource {
            source_id: source.source_id.clone(),
            label: source.display_label.clone(),
            reason: reason.into(),
        });
    }

    /// Returns `true` if at least one source was configured and none produced a series.
    pub fn is_all_skipped(&self) -> bool {
        self.series.is_empty() && !self.skipped.is_empty()
    }
}

/// Receives finished series for drawing or export.
pub trait ChartSink {
    /// Accept one labelled series.
    fn series(&mut self, label: &str, points: &[(f64, f64)]) -> Result<()>;

    /// Accept a note about a source that was not plotted.
    fn skipped(&mut self, skipped: &SkippedSource) -> Result<()> {
        let _ = skipped;
        Ok(())
    }

    /// Called once after every series has been handed over.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Load every configured source through `loader` and build the chart.
pub fn assemble<L: SourceLoader + ?Sized>(config: &ChartConfig, loader: &L) -> Chart {
    let _timer = Timer::start(format!("{} chart assembly", config.kind));
    let mut chart = Chart::new(config);

    match config.kind {
        ChartKind::Absolute => assemble_absolute(config, loader, &mut chart),
        ChartKind::Ratio => assemble_ratio(config, loader, &mut chart),
        ChartKind::Change => assemble_change(config, loader, &mut chart),
    }

    chart
}

/// Hand every series, then every skipped source, to `sink`.
pub fn render(chart: &Chart, sink: &mut dyn ChartSink) -> Result<()> {
    for series in &chart.series {
        sink.series(&series.label, &series.points)?;
    }
    for skipped in &chart.skipped {
        sink.skipped(skipped)?;
    }
    sink.finish()
}

fn load_series<L: SourceLoader + ?Sized>(
    loader: &L,
    source_id: &str,
    aggregate: &str,
) -> Result<RecordSeries, SourceError> {
    let document = loader.load(source_id)?;
    let series =
        loader::extract(&document, aggregate).map_err(|error| SourceError::Record {
            source_id: source_id.to_string(),
            error,
        })?;
    vprintln!(
        "  {source_id}: {} of {} records tagged '{aggregate}'",
        series.len(),
        document.benchmarks.len()
    );
    Ok(series)
}

fn assemble_absolute<L: SourceLoader + ?Sized>(
    config: &ChartConfig,
    loader: &L,
    chart: &mut Chart,
) {
    let factor = config.factor();
    for source in config.subjects() {
        dprintln!("Processing {}", source.source_id);
        match load_series(loader, &source.source_id, &config.aggregate) {
            Ok(series) => chart.series.push(ChartSeries {
                label: source.display_label.clone(),
                points: series
                    .iter()
                    .map(|p| (p.size as f64, p.throughput / factor))
                    .collect(),
            }),
            Err(e) => chart.skip(source, e),
        }
    }
}

fn assemble_ratio<L: SourceLoader + ?Sized>(config: &ChartConfig, loader: &L, chart: &mut Chart) {
    let references: Vec<&SourceSpec> = config.references().collect();
    let qualify = references.len() > 1;

    // Subjects are read once; a read failure is reported once, not per reference.
    let mut subjects = Vec::new();
    for subject in config.subjects() {
        dprintln!("Processing {}", subject.source_id);
        match load_series(loader, &subject.source_id, &config.aggregate) {
            Ok(series) => subjects.push((subject, series)),
            Err(e) => chart.skip(subject, e),
        }
    }

    for reference in references {
        dprintln!("Processing reference {}", reference.source_id);
        let base = match load_series(loader, &reference.source_id, &config.aggregate) {
            Ok(series) => series,
            Err(e) => {
                chart.skip(reference, e);
                continue;
            }
        };

        for (subject, series) in &subjects {
            let label = if qualify {
                format!("{} / {}", subject.display_label, reference.display_label)
            } else {
                subject.display_label.clone()
            };
            match align::ratio(series, &base) {
                Ok(ratios) => chart.series.push(ratio_series(label, &ratios)),
                Err(error) => chart.skip(
                    subject,
                    SourceError::Degenerate {
                        reference: reference.source_id.clone(),
                        error,
                    },
                ),
            }
        }
    }
}

fn assemble_change<L: SourceLoader + ?Sized>(config: &ChartConfig, loader: &L, chart: &mut Chart) {
    for source in config.subjects() {
        dprintln!("Processing {}", source.source_id);
        let previous_id = reference_name(&source.source_id);
        let result = load_series(loader, &source.source_id, &config.aggregate).and_then(|current| {
            let previous = load_series(loader, &previous_id, &config.aggregate)?;
            align::ratio(&current, &previous).map_err(|error| SourceError::Degenerate {
                reference: previous_id.clone(),
                error,
            })
        });
        match result {
            Ok(ratios) => chart
                .series
                .push(ratio_series(source.display_label.clone(), &ratios)),
            Err(e) => chart.skip(source, e),
        }
    }
}

fn ratio_series(label: String, ratios: &RatioSeries) -> ChartSeries {
    ChartSeries {
        label,
        points: ratios.iter().map(|p| (p.size as f64, p.ratio)).collect(),
    }
}
