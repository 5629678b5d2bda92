//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for TruthScope binaries.
//!
//! * Console output (compact, ANSI) and/or rolling log files written by a
//!   non-blocking background worker.
//! * Plain-text or JSON lines for files; console can switch to JSON too.
//! * `RUST_LOG` takes precedence over the programmatic level unless an
//!   explicit [`LoggerBuilder::env_filter`] directive string is given.
//!
//! ```rust
//! use tscope_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("truthscope")
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
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Line format of an output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug)]
struct FileOutput {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    format: LogFormat,
}

/// Configures and installs the global subscriber.
#[derive(Debug)]
#[must_use = "call .init() to install the subscriber"]
pub struct LoggerBuilder {
    name: String,
    console: Option<LogFormat>,
    level: LevelFilter,
    env_filter: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Minimum level when `RUST_LOG` is not set.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives, e.g. `"tscope_news=debug,hyper=info"`.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.env_filter = Some(directives.into());
        self
    }

    /// Enables or disables console output.
    pub fn console(mut self, enabled: bool) -> Self {
        self.console = enabled.then(|| self.console.unwrap_or_default());
        self
    }

    /// Writes console lines as JSON.
    pub const fn console_json(mut self) -> Self {
        self.console = Some(LogFormat::Json);
        self
    }

    /// Adds a rolling file output in `dir`, named `<name>.<date>.log`.
    pub fn file(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file = Some(FileOutput {
            dir: dir.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            format: LogFormat::Compact,
        });
        self
    }

    /// Rotation of the file output. No effect without [`Self::file`].
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// How many rotated files to keep. No effect without [`Self::file`].
    pub const fn max_files(mut self, max_files: usize) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.max_files = max_files;
        }
        self
    }

    /// Line format of the file output. No effect without [`Self::file`].
    pub const fn file_format(mut self, format: LogFormat) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.format = format;
        }
        self
    }

    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive for as long as file logs should
    /// be written; dropping it flushes and stops the background worker.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero
    ///   `max_files`, bad filter directives, or no enabled output.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log
    ///   directory or file cannot be created.
    /// * [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.build_filter()?;

        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

        if let Some(format) = self.console {
            let console = fmt::layer().with_ansi(true);
            layers.push(match format {
                LogFormat::Compact => console.compact().boxed(),
                LogFormat::Json => console.json().boxed(),
            });
        }

        let guard = match self.file {
            Some(file) => {
                fs::create_dir_all(&file.dir)
                    .context(format!("Creating log directory {}", file.dir.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(file.rotation)
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(file.max_files)
                    .build(&file.dir)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                layers.push(match file.format {
                    LogFormat::Compact => layer.boxed(),
                    LogFormat::Json => layer.json().boxed(),
                });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "no output enabled; enable the console or a log file".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.file.as_ref().is_some_and(|file| file.max_files == 0) {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        Ok(())
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            Some(directives) => {
                builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("invalid filter '{directives}': {e}").into(),
                    context: None,
                })
            },
            None => Ok(builder.from_env_lossy()),
        }
    }
}

/// Handle to the installed subscriber.
#[must_use = "dropping the handle stops file logging"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` prefixes rolling log files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            console: Some(LogFormat::Compact),
            level: LevelFilter::INFO,
            env_filter: None,
            file: None,
        }
    }

    /// Whether a file output (and its background worker) is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Flushing log files");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = Logger::builder("truthscope");
        assert_eq!(builder.console, Some(LogFormat::Compact));
        assert_eq!(builder.level, LevelFilter::INFO);
        assert!(builder.file.is_none());
    }

    #[test]
    fn file_options_apply_only_after_file() {
        let builder = Logger::builder("truthscope").max_files(3);
        assert!(builder.file.is_none());

        let builder = Logger::builder("truthscope")
            .file("logs")
            .max_files(3)
            .rotation(Rotation::HOURLY)
            .file_format(LogFormat::Json);
        let file = builder.file.as_ref().unwrap();
        assert_eq!(file.max_files, 3);
        assert_eq!(file.format, LogFormat::Json);
    }

    #[test]
    fn rejects_empty_name_and_zero_files() {
        let err = Logger::builder("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder("truthscope").file("logs").max_files(0).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn rejects_no_outputs() {
        let err = Logger::builder("truthscope").console(false).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn rejects_bad_filter() {
        let err = Logger::builder("truthscope").env_filter("tscope=[").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
