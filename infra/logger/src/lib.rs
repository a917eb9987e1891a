//! # Logger
//!
//! A centralized logging utility for the project.
//! It provides a unified way to configure console and file logging with
//! rotation, non-blocking I/O, and environment-based filtering.
//!
//! * Use [`LoggerBuilder::env_filter`] to set module-directed filters
//!   (e.g., `"cosmo_catalog=debug,hyper=info"`), in addition to `RUST_LOG`.
//! * File output is optional; when enabled, logs roll per the configured
//!   [`Rotation`] and old files beyond `max_files` are pruned.
//!
//! ## Example
//!
//! ```rust
//! # use cosmo_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("my-app")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// A builder for configuring and initializing the global tracing subscriber.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

impl LoggerBuilder {
    /// Sets the name of the logger; used as the rolling log file prefix.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables console logging.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Configures the minimum log level to be emitted.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Sets the directory for rolling log files, enabling file output.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Configures the log file rotation strategy.
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Configures the maximum number of log files to keep.
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Enables JSON formatting for the file layer.
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Adds an explicit env filter (e.g., `cosmo_catalog=debug,hyper=info`).
    ///
    /// Environment variables still override via `RUST_LOG`; this is a
    /// programmatic default. Invalid filters cause [`init`](Self::init) to
    /// return an error.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. **Note:** the handle contains a [`WorkerGuard`]
    /// that must be kept alive for the duration of the program so that
    /// non-blocking logs are flushed correctly.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already
    /// been set, [`LoggerError::InvalidConfiguration`] for invalid builder
    /// settings, and [`LoggerError::Filter`] for malformed filter directives.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
            });
        }
        if !self.console && self.path.is_none() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
            });
        }

        let mut env_filter =
            EnvFilter::builder().with_default_directive(self.level.into()).from_env_lossy();
        if let Some(directives) = &self.env_filter {
            for directive in directives.split(',').filter(|d| !d.trim().is_empty()) {
                env_filter = env_filter.add_directive(directive.trim().parse()?);
            }
        }

        let mut layers = Vec::new();

        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = self.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Internal {
                message: format!("Failed to create path {}: {e}", path.display()).into(),
            })?;

            let file_appender = RollingFileAppender::builder()
                .rotation(self.rotation)
                .filename_prefix(&self.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.max_files)
                .build(path)?;

            let (non_blocking, g) = tracing_appender::non_blocking(file_appender);
            let file_layer = layer().with_writer(non_blocking).with_ansi(false);

            layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(g)
        } else {
            None
        };

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
///
/// This struct holds the background worker guard. Drop it only when the
/// application is shutting down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing
    /// subscriber.
    ///
    /// The `name` serves as the primary identifier for your logs and is used
    /// as a prefix for rolling log files (e.g., `my-app.2023-10-27.log`).
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Returns a reference to the underlying worker guard, if present.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
