//! Integration tests for the perfchart binary.
//!
//! These tests invoke perfchart as a subprocess against the chart files and
//! benchmark results under `tests/fixtures/`.

use std::path::PathBuf;
use std::process::{Command, Output};

use blast_perf::ChartKind;
use blast_perf::output::ChartData;

/// Path to the fixture directory.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run perfchart with `args` and capture its output.
fn perfchart(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_perfchart"))
        .args(args)
        .output()
        .expect("failed to execute perfchart")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "perfchart failed (exit={:?}):\nstdout:\n{}\nstderr:\n{}",
        output.status.code(),
        stdout(output),
        stderr(output),
    );
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

#[test]
fn absolute_chart_skips_missing_source() {
    let config = fixture("absolute.toml");
    let output = perfchart(&["render", config.to_str().unwrap()]);
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("Processing dgemm-mkl.json"));
    assert!(out.contains("  MKL\n"));
    assert!(out.contains("  BLAST (SP)\n"));
    assert!(out.contains("20.0000"));
    assert!(out.contains("Skipping LIBXSMM (dgemm-libxsmm.json)"));
    assert!(out.contains("1 source(s) skipped."));
}

#[test]
fn strict_fails_on_skipped_source() {
    let config = fixture("absolute.toml");
    let output = perfchart(&["render", "--strict", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--strict"));
}

#[test]
fn quiet_hides_progress() {
    let config = fixture("absolute.toml");
    let output = perfchart(&["-q", "render", config.to_str().unwrap()]);
    assert_success(&output);
    assert!(!stdout(&output).contains("Processing"));
}

#[test]
fn ratio_chart_drops_unmatched_sizes() {
    let config = fixture("ratio.toml");
    let output = perfchart(&["-q", "render", config.to_str().unwrap()]);
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("Ratio"));
    assert!(out.contains("    64  0.5000"));
    assert!(out.contains("   128  1.0000"));
    assert!(!out.contains("256"), "size 256 has no reference point:\n{out}");
}

#[test]
fn change_chart_uses_previous_run() {
    let config = fixture("change.toml");
    let output = perfchart(&["-q", "render", config.to_str().unwrap()]);
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("    64  1.2500"));
    assert!(out.contains("   128  0.8000"));
    assert!(out.contains("dgemm-mkl.ref.json"));
}

#[test]
fn aggregate_override() {
    let config = fixture("change.toml");
    let output = perfchart(&[
        "-q",
        "render",
        "--aggregate",
        "median",
        config.to_str().unwrap(),
    ]);
    assert_success(&output);
    assert!(stdout(&output).contains("1.3125"));
}

#[test]
fn all_sources_missing_fails() {
    let config = fixture("missing-only.toml");
    let output = perfchart(&["render", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("all 1 source(s) were skipped"));
}

#[test]
fn json_output_round_trips() {
    let config = fixture("ratio.toml");
    let out_path = std::env::temp_dir().join(format!(
        "perfchart-ratio-{}.json",
        std::process::id()
    ));
    let output = perfchart(&[
        "-q",
        "render",
        "--format",
        "json",
        "-o",
        out_path.to_str().unwrap(),
        config.to_str().unwrap(),
    ]);
    assert_success(&output);

    let json = std::fs::read_to_string(&out_path).expect("chart data not written");
    let _ = std::fs::remove_file(&out_path);
    let data: ChartData = serde_json::from_str(&json).expect("chart data is not valid JSON");

    assert_eq!(data.kind, ChartKind::Ratio);
    assert_eq!(data.aggregate, "median");
    assert_eq!(data.series.len(), 2);
    assert_eq!(data.series[0].label, "MKL");
    assert_eq!(data.series[0].points, vec![(64.0, 0.5), (128.0, 0.5)]);
    assert!(data.skipped.is_empty());
}

#[test]
fn json_requires_output_path() {
    let config = fixture("ratio.toml");
    let output = perfchart(&["render", "--format", "json", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("requires --output"));
}

#[test]
fn unknown_format_rejected() {
    let config = fixture("ratio.toml");
    let output = perfchart(&["render", "--format", "svg", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown output format 'svg'"));
}

// ---------------------------------------------------------------------------
// inspect / ref-name
// ---------------------------------------------------------------------------

#[test]
fn inspect_shows_context_and_series() {
    let file = fixture("data/dgemm-mkl.json");
    let output = perfchart(&["inspect", "--aggregate", "median", file.to_str().unwrap()]);
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("Host         bench01"));
    assert!(out.contains("12 records, 3 tagged 'median'"));
    assert!(out.contains("4.1000e10"));
}

#[test]
fn inspect_lists_available_aggregates() {
    let file = fixture("data/dgemm-mkl.json");
    let output = perfchart(&["inspect", "--aggregate", "cv", file.to_str().unwrap()]);
    assert_success(&output);
    assert!(stdout(&output).contains("Available aggregates: mean, median, stddev"));
}

#[test]
fn inspect_ignores_entries_without_counters() {
    let file = fixture("data/dgemm-blast-static-panel.json");
    let output = perfchart(&["inspect", "--aggregate", "mean", file.to_str().unwrap()]);
    assert_success(&output);
    assert!(stdout(&output).contains("7 records, 2 tagged 'mean'"));

    let output = perfchart(&["inspect", "--aggregate", "cv", file.to_str().unwrap()]);
    assert_success(&output);
    assert!(stdout(&output).contains("Available aggregates: BigO, RMS, mean, median"));
}

#[test]
fn inspect_missing_file_fails() {
    let file = fixture("data/dgemm-openblas.json");
    let output = perfchart(&["inspect", file.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no such file"));
}

#[test]
fn ref_name_prints_derived_names() {
    let output = perfchart(&["ref-name", "dgemm-blast.json", "a.b.json"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "dgemm-blast.ref.json\na.b.ref.json\n");
}
