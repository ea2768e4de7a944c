//! Command handlers for `perfchart render`, `inspect` and `ref-name`.
//!
//! Bridges the `blast-perf` analysis modules (config, loader, chart
//! assembly, output sinks) to the command-line interface.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use blast_perf::output::{self, JsonSink, TableSink};
use blast_perf::{ChartConfig, DirectoryLoader, dprintln, vprintln, wprintln};

use crate::cli::{InspectArgs, RefNameArgs, RenderArgs};

/// Where assembled series go.
enum OutputFormat<'a> {
    Table,
    Json(&'a Path),
}

impl<'a> OutputFormat<'a> {
    fn from_args(args: &'a RenderArgs) -> Result<Self> {
        match args.format.as_str() {
            "table" => Ok(Self::Table),
            "json" => {
                let path = args.output.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("json format requires --output (-o) path for the chart data")
                })?;
                Ok(Self::Json(path))
            }
            other => bail!("unknown output format '{other}' (expected: table, json)"),
        }
    }
}

/// `perfchart render` — assemble a chart and output its series.
pub fn cmd_render(args: &RenderArgs) -> Result<()> {
    let format = OutputFormat::from_args(args)?;

    let mut config = ChartConfig::load(&args.config)
        .with_context(|| format!("loading chart config {}", args.config.display()))?;
    if let Some(ref dir) = args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(ref aggregate) = args.aggregate {
        config.aggregate.clone_from(aggregate);
        config.validate()?;
    }

    vprintln!(
        "Chart: {} of '{}' aggregates, {} source(s) from {}",
        config.kind,
        config.aggregate,
        config.sources.len(),
        config.data_dir().display()
    );

    let loader = DirectoryLoader::new(config.data_dir());
    let chart = blast_perf::assemble(&config, &loader);

    match format {
        OutputFormat::Table => {
            blast_perf::render(&chart, &mut TableSink::stdout(chart.kind))?;
        }
        OutputFormat::Json(path) => {
            for skipped in &chart.skipped {
                wprintln!(
                    "skipping {} ({}): {}",
                    skipped.label,
                    skipped.source_id,
                    skipped.reason
                );
            }
            let mut sink = JsonSink::new(path, chart.kind, &chart.aggregate);
            blast_perf::render(&chart, &mut sink)?;
            dprintln!(
                "Wrote {} series to {}",
                chart.series.len(),
                sink.path().display()
            );
        }
    }

    if chart.is_all_skipped() {
        bail!(
            "no series produced: all {} source(s) were skipped",
            chart.skipped.len()
        );
    }
    if args.strict && !chart.skipped.is_empty() {
        bail!(
            "{} source(s) skipped and --strict was given",
            chart.skipped.len()
        );
    }

    Ok(())
}

/// `perfchart inspect` — show one result file.
pub fn cmd_inspect(args: &InspectArgs) -> Result<()> {
    let document = blast_perf::load_document(&args.file)?;
    let series = blast_perf::extract(&document, &args.aggregate)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", args.file.display())?;
    if let Some(ref context) = document.context {
        output::write_context(&mut out, context)?;
    }
    writeln!(
        out,
        "  {} records, {} tagged '{}'",
        document.benchmarks.len(),
        series.len(),
        args.aggregate
    )?;

    if series.is_empty() {
        let kinds: BTreeSet<&str> = document
            .benchmarks
            .iter()
            .filter_map(|record| record.aggregate_kind.as_deref())
            .collect();
        if kinds.is_empty() {
            writeln!(out, "  No aggregate records in this file.")?;
        } else {
            let kinds: Vec<&str> = kinds.into_iter().collect();
            writeln!(out, "  Available aggregates: {}", kinds.join(", "))?;
        }
    } else {
        output::write_measurements(&mut out, &args.aggregate, &series)?;
    }
    writeln!(out)?;

    Ok(())
}

/// `perfchart ref-name` — print derived previous-run names.
pub fn cmd_ref_name(args: &RefNameArgs) {
    for name in &args.names {
        println!("{}", blast_perf::reference_name(name));
    }
}
