//! Logging setup shared by the sensor tools
//!
//! Console output goes to stderr so that decoded data on stdout stays
//! pipeable. An optional daily-rolling file layer mirrors the console.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use errors::{SensorError, SensorResult};
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Custom format for log level with brackets: `[INFO]`, `[WARN]`, etc.
fn format_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

/// Custom event formatter that outputs: `timestamp [LEVEL] message`
///
/// Example output: `2025-12-02T00:50:44.809Z [INFO] Readings stored`
pub struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(writer, "{} ", now.format("%Y-%m-%dT%H:%M:%S%.3fZ"))?;

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            let color = match level {
                Level::TRACE => "\x1b[35m", // magenta
                Level::DEBUG => "\x1b[34m", // blue
                Level::INFO => "\x1b[32m",  // green
                Level::WARN => "\x1b[33m",  // yellow
                Level::ERROR => "\x1b[31m", // red
            };
            write!(writer, "{}{}\x1b[0m ", color, format_level(&level))?;
        } else {
            write!(writer, "{} ", format_level(&level))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

// Keeps the non-blocking file writer alive for the life of the process
static FILE_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Name used for the log file prefix (e.g., "sensorctl")
    pub service_name: String,
    /// Default filter level when `RUST_LOG` is not set
    pub level: String,
    /// Emit JSON lines instead of the bracketed text format
    pub json: bool,
    /// Colorize console output
    pub ansi: bool,
    /// Also write logs to `{log_dir}/{service_name}.log.YYYY-MM-DD`
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "sensorctl".to_string(),
            level: "info".to_string(),
            json: false,
            ansi: true,
            log_dir: None,
        }
    }
}

/// Build filter directives, letting `RUST_LOG` win over the configured level
///
/// The database driver logs every statement at info; it is capped at warn
/// unless `RUST_LOG` says otherwise.
pub fn filter_directives(rust_log: Option<&str>, level: &str) -> String {
    match rust_log {
        Some(env) if !env.trim().is_empty() => env.to_string(),
        _ => format!("{},sqlx=warn", level),
    }
}

/// Initialize the global subscriber
///
/// Fails if a global subscriber is already installed or the level is not a
/// valid filter.
pub fn init_with_config(config: &LogConfig) -> SensorResult<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = filter_directives(rust_log.as_deref(), &config.level);
    let env_filter = EnvFilter::try_new(&directives).map_err(|e| SensorError::InvalidConfig {
        field: "log.level".to_string(),
        reason: format!("'{}': {}", directives, e),
    })?;

    let console_layer = if config.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .event_format(BracketedLevelFormat)
            .boxed()
    };

    let file_layer = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", config.service_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            let slot = FILE_GUARD.get_or_init(|| Mutex::new(None));
            match slot.lock() {
                Ok(mut slot) => *slot = Some(guard),
                Err(poisoned) => *poisoned.into_inner() = Some(guard),
            }

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .event_format(BracketedLevelFormat)
                    .boxed(),
            )
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SensorError::Other(anyhow::Error::new(e)))?;

    tracing::debug!("Logging initialized: {}", directives);
    if let Some(dir) = &config.log_dir {
        tracing::debug!("Log file: {}/{}.log.*", dir.display(), config.service_name);
    }

    Ok(())
}
