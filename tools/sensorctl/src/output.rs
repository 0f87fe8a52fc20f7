//! Output formatting for sensorctl

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use errors::{ErrorInfo, SensorError};
use sensor_frames::FrameReport;
use sensor_store::IngestSummary;
use serde::Serialize;
use tracing::{debug, error, info, trace, warn, Level};

/// How decoded bytes are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ByteFormat {
    /// `[0xDE, 0xAD, 0xBE, 0xEF]`
    List,
    /// `DE AD BE EF`
    Spaced,
    /// `222 173 190 239`
    Decimal,
}

/// Render bytes in the requested format
pub fn format_bytes(bytes: &[u8], format: ByteFormat) -> String {
    match format {
        ByteFormat::List => {
            let items: Vec<String> = bytes.iter().map(|b| format!("0x{:02X}", b)).collect();
            format!("[{}]", items.join(", "))
        },
        ByteFormat::Spaced => common::hex::encode_spaced(bytes),
        ByteFormat::Decimal => bytes
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[derive(Serialize)]
struct DecodedJson<'a> {
    hex: &'a str,
    bytes: &'a [u8],
}

/// Print a decoded hex string
pub fn print_decoded(hex: &str, bytes: &[u8], format: ByteFormat, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&DecodedJson { hex, bytes })?);
    } else {
        println!("{}", hex);
        println!("{}", format_bytes(bytes, format));
    }
    Ok(())
}

/// Print decoded readings as a table
pub fn print_report(report: &FrameReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if report.readings.is_empty() {
        println!("{}", "No valid packets found".yellow());
    } else {
        println!(
            "{:>5}  {:>7}  {:>9}  {}",
            "#".bold(),
            "counter".bold(),
            "pressure".bold(),
            "status".bold()
        );
        for (i, reading) in report.readings.iter().enumerate() {
            println!(
                "{:>5}  {:>7}  {:>9.2}  {}",
                i + 1,
                reading.counter,
                reading.pressure,
                reading.status
            );
        }
    }

    if report.skipped > 0 {
        println!(
            "{} {} chunk(s) skipped",
            "NOTE".bright_yellow(),
            report.skipped
        );
    }
    Ok(())
}

/// Print the result of an ingest run
pub fn print_summary(summary: &IngestSummary, dry_run: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }

    if dry_run {
        println!(
            "{} {} readings decoded, nothing written (dry run)",
            "DRY-RUN".bright_cyan(),
            summary.decoded
        );
    } else {
        println!(
            "{} Stored {} readings",
            "OK".bright_green(),
            summary.saved
        );
    }
    if summary.skipped > 0 {
        println!(
            "{} {} chunk(s) skipped",
            "NOTE".bright_yellow(),
            summary.skipped
        );
    }
    Ok(())
}

/// Build the error report for any failure that reaches `main`
pub fn error_info(err: &anyhow::Error) -> ErrorInfo {
    match err.downcast_ref::<SensorError>() {
        Some(sensor_err) => {
            let mut info = sensor_err.to_error_info();
            // Keep any context added on the way up
            info.message = format!("{:#}", err);
            info
        },
        None => ErrorInfo::new(format!("{:#}", err)),
    }
}

/// Record a failure in the log at the level its category calls for
pub fn log_error(err: &anyhow::Error) {
    let level = err
        .downcast_ref::<SensorError>()
        .map_or(Level::ERROR, SensorError::log_level);
    let code = err
        .downcast_ref::<SensorError>()
        .map_or("UNKNOWN_ERROR", SensorError::error_code);

    match level {
        Level::ERROR => error!(error_code = code, "{:#}", err),
        Level::WARN => warn!(error_code = code, "{:#}", err),
        Level::INFO => info!(error_code = code, "{:#}", err),
        Level::DEBUG => debug!(error_code = code, "{:#}", err),
        Level::TRACE => trace!(error_code = code, "{:#}", err),
    }
}

/// Print an error to stderr, as JSON or colored text
pub fn print_error(info: &ErrorInfo, json: bool) {
    if json {
        match serde_json::to_string(info) {
            Ok(line) => eprintln!("{}", line),
            Err(_) => eprintln!("{}", info.message),
        }
        return;
    }

    eprintln!("{} {}", "ERROR".red().bold(), info.message);
    for (field, reasons) in &info.field_errors {
        for reason in reasons {
            eprintln!("  {}: {}", field.yellow(), reason);
        }
    }
}
