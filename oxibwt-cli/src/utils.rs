//! Utility functions for the CLI.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::LevelFilter;
use oxibwt_core::{Direction, StreamStats};
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Map the number of `-v` flags to a log level.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the terminal logger. Log lines go to stderr since stdout
/// carries transformed data.
pub fn init_logging(verbose: u8) {
    // A second init only fails if a logger already exists; keep that one
    let _ = TermLogger::init(
        level_for_verbosity(verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Create a byte-counting spinner on stderr.
pub fn create_spinner(enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {bytes} read ({bytes_per_sec}) {msg}")
    {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// JSON statistics line for `--stats`.
#[derive(Debug, Serialize)]
pub struct StatsJson<'a> {
    stage: &'a str,
    direction: &'a str,
    bytes_read: u64,
    bytes_written: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<f64>,
    elapsed_ms: u128,
}

impl<'a> StatsJson<'a> {
    pub fn new(stage: &'a str, direction: Direction, stats: StreamStats, elapsed: Duration) -> Self {
        let ratio = (stats.bytes_read > 0)
            .then(|| stats.bytes_written as f64 / stats.bytes_read as f64);
        Self {
            stage,
            direction: match direction {
                Direction::Forward => "forward",
                Direction::Inverse => "inverse",
            },
            bytes_read: stats.bytes_read,
            bytes_written: stats.bytes_written,
            ratio,
            elapsed_ms: elapsed.as_millis(),
        }
    }
}
