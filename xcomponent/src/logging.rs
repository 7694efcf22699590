//! Logging setup built on `tracing-subscriber`.
//!
//! Log lines go to stderr, and optionally to a file through a non-blocking
//! `tracing-appender` writer. `RUST_LOG` takes precedence over the configured
//! level.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Default log level when neither configuration nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Maximum level to emit.
    pub level: LevelFilter,

    /// Optional file receiving a copy of every log line.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Set the maximum level.
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Raise the level by `verbosity` steps above the current one.
    ///
    /// Each step moves one level more verbose (warn, info, debug, trace).
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        const LEVELS: [LevelFilter; 6] = [
            LevelFilter::OFF,
            LevelFilter::ERROR,
            LevelFilter::WARN,
            LevelFilter::INFO,
            LevelFilter::DEBUG,
            LevelFilter::TRACE,
        ];
        let current = LEVELS.iter().position(|l| *l == self.level).unwrap_or(2);
        let raised = (current + usize::from(verbosity)).min(LEVELS.len() - 1);
        self.level = LEVELS[raised];
        self
    }

    /// Also write logs to `path`.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }
}

/// Parse a level name such as `info` or `debug`.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(value.trim()).ok()
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file when dropped; keep it alive for
/// the life of the program. Calling this twice leaves the first subscriber in
/// place.
pub fn init_logging(config: &LoggingConfig) -> std::io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .boxed();

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = fmt::layer().with_writer(writer).with_ansi(false).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // A subscriber may already be installed (tests, embedding binaries).
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(filter)
        .try_init();

    Ok(guard)
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}
