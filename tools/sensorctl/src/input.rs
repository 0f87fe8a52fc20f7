//! Command-line input helpers

use anyhow::{Context, Result};
use errors::SensorError;
use std::io::Read;

/// Resolve a hex argument; `-` reads all of stdin
pub fn read_hex_arg(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(SensorError::from)
        .context("Failed to read hex data from stdin")?;
    Ok(text)
}

/// Parse one byte given as decimal (`222`) or hex (`0xDE`)
pub fn parse_byte(value: &str) -> std::result::Result<u8, String> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => value.parse::<u8>(),
    };
    parsed.map_err(|e| format!("'{}' is not a byte (0-255 or 0x00-0xFF): {}", value, e))
}
