//! Progress and diagnostic output for chart assembly.
//!
//! Three output levels controlled by CLI flags:
//! - **Quiet** (`-q`): warnings and final output only
//! - **Default** (no flag): one "Processing" line per source
//! - **Verbose** (`-v`): resolved paths, series lengths, timings
//!
//! Skipped sources are listed at every level: in the table itself when
//! printing to the terminal, and on stderr via [`crate::wprintln!`] when the chart
//! is written to a file.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Warnings and results only.
    Quiet = 0,
    /// Per-source progress lines.
    #[default]
    Default = 1,
    /// Per-source details and timings.
    Verbose = 2,
}

impl Verbosity {
    /// Map the `-q` / `-v` flag pair to a level. `quiet` wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Default,
        }
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Set the process-wide level. Called once from `main`.
pub fn init(level: Verbosity) {
    LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Current process-wide level.
pub fn level() -> Verbosity {
    match LEVEL.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Default,
    }
}

/// Returns `true` if verbose mode is active.
pub fn is_verbose() -> bool {
    level() == Verbosity::Verbose
}

/// Returns `true` if quiet mode is active.
pub fn is_quiet() -> bool {
    level() == Verbosity::Quiet
}

/// Print a line only in verbose mode.
///
/// ```ignore
/// vprintln!("  reading {}", path.display());
/// ```
#[macro_export]
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!($($arg)*);
        }
    };
}

/// Print a line unless quiet mode is active.
///
/// ```ignore
/// dprintln!("Processing {}", source.source_id);
/// ```
#[macro_export]
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            println!($($arg)*);
        }
    };
}

/// Print a `warning:` line to stderr regardless of level.
#[macro_export]
macro_rules! wprintln {
    ($($arg:tt)*) => {
        eprintln!("warning: {}", format_args!($($arg)*));
    };
}

/// Prints the elapsed time of a scope on drop, in verbose mode only.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Start timing `label`.
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if is_verbose() {
            println!("  {}: {:.1?}", self.label, self.start.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_flag_wins() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Default);
    }
}
