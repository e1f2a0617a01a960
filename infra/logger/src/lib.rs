//! # Logger
//!
//! Installs the global `tracing` subscriber for Roster binaries.
//!
//! * Compact ANSI console output.
//! * Optional rolling file output (plain text or JSON) through a non-blocking writer.
//! * `EnvFilter` with a default level; an explicit directive string wins over `RUST_LOG`.
//! * Optional `profiling` feature adds the tokio-console layer (needs `--cfg tokio_unstable`).
//!
//! ## Example
//!
//! ```rust
//! # use roster_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("roster-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
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

/// File sink settings; only present when a directory was configured.
#[derive(Debug)]
struct FileSink {
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

/// Builder for the global tracing subscriber.
#[must_use = "call .init() to install the subscriber"]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    directives: Option<String>,
    file: Option<FileSink>,
}

impl LoggerBuilder {
    /// Name used as the rolling file prefix (e.g. `roster-server.2026-10-19.log`).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives (e.g. `roster_employees=trace,hyper=warn`).
    ///
    /// When unset, `RUST_LOG` is read instead. Invalid directives make [`LoggerBuilder::init`] fail.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Writes logs to daily rolling files inside `directory`.
    pub fn path(mut self, directory: impl Into<PathBuf>) -> Self {
        self.file = Some(FileSink {
            directory: directory.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        self
    }

    /// Rotation strategy for the file sink. No effect without [`LoggerBuilder::path`].
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// Number of rotated files kept. No effect without [`LoggerBuilder::path`].
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.max_files = max;
        }
        self
    }

    /// Switches the file sink to JSON lines. No effect without [`LoggerBuilder::path`].
    pub fn json(mut self, enabled: bool) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.json = enabled;
        }
        self
    }

    /// Installs the subscriber.
    ///
    /// The returned [`Logger`] owns the file writer guard and must outlive all logging.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    ///   bad directives or when no sink is enabled.
    /// * [`LoggerError::Appender`] if the log directory cannot be used.
    /// * [`LoggerError::Subscriber`] if a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.build_filter()?;

        let mut layers = Vec::new();

        #[cfg(all(feature = "profiling", tokio_unstable))]
        if self.console {
            layers.push(console_subscriber::spawn().boxed());
        }

        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match self.file {
            Some(file) => {
                fs::create_dir_all(&file.directory).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(
                        format!("Failed to create log directory {}", file.directory.display())
                            .into(),
                    ),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(file.rotation)
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(file.max_files)
                    .build(&file.directory)
                    .context("Failed to build rolling file appender")?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            }
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging sink enabled; enable the console or set a path".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.file.as_ref().is_some_and(|f| f.max_files == 0) {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        Ok(())
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => {
                builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{directives}': {e}").into(),
                    context: None,
                })
            }
        }
    }
}

/// Handle to the installed subscriber. Dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder with console output at `INFO` and no file sink.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            name: String::new(),
            console: true,
            level: LevelFilter::INFO,
            directives: None,
            file: None,
        }
    }

    /// Whether a file sink (and its background writer) is active.
    #[must_use]
    pub const fn has_file_sink(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
