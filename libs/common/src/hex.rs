//! Hex codec for sensor payloads
//!
//! Sensor dumps arrive as loosely formatted text: `"80 05 01 2C"`,
//! `"80:05:01:2c"`, `"0x80 0x05"`. [`normalize`] turns any of those into a
//! canonical uppercase digit string and [`decode`] turns it into bytes.

use errors::{SensorError, SensorResult};
use std::fmt::Write;

/// Characters that separate byte groups in addition to whitespace
const SEPARATORS: [char; 4] = [':', '-', ',', '_'];

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || SEPARATORS.contains(&ch)
}

/// Normalize loosely formatted hex text into canonical uppercase digits
///
/// Separators are dropped, a `0x`/`0X` prefix on any group is dropped, and
/// the remaining digits are uppercased. Fails with `InvalidFormat` on a
/// non-hex character or when the digits do not pair up. A prefix only
/// counts when digits follow it, so a bare `0x` is rejected at the `x`.
///
/// Positions in errors index the canonical digits, i.e. the text with
/// separators and prefixes removed.
///
/// Example: `"de ad:BE-ef"` -> `"DEADBEEF"`
pub fn normalize(input: &str) -> SensorResult<String> {
    let mut canonical = String::with_capacity(input.len());

    for group in input.split(is_separator) {
        let digits = group
            .strip_prefix("0x")
            .or_else(|| group.strip_prefix("0X"))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(group);

        for ch in digits.chars() {
            if !ch.is_ascii_hexdigit() {
                // Only ASCII is ever pushed, so the byte length is the char index
                return Err(SensorError::invalid_digit(ch, canonical.len()));
            }
            canonical.push(ch.to_ascii_uppercase());
        }
    }

    if canonical.len() % 2 != 0 {
        return Err(SensorError::odd_length(canonical.len()));
    }

    Ok(canonical)
}

/// Decode hex text into bytes, most-significant nibble first
///
/// Example: `"DE AD BE EF"` -> `[0xDE, 0xAD, 0xBE, 0xEF]`
pub fn decode(input: &str) -> SensorResult<Vec<u8>> {
    let canonical = normalize(input)?;
    hex::decode(&canonical).map_err(|err| from_hex_error(err, canonical.len()))
}

fn from_hex_error(err: hex::FromHexError, len: usize) -> SensorError {
    match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => SensorError::invalid_digit(c, index),
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            SensorError::odd_length(len)
        },
    }
}

/// Encode bytes to uppercase hex string
/// Example: [0x12, 0x34, 0xAB] -> "1234AB"
pub fn encode_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Encode bytes to space separated uppercase pairs
/// Example: [0xDE, 0xAD] -> "DE AD"
pub fn encode_spaced(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len() * 3);
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        // Writing to String buffer is infallible
        let _ = write!(&mut result, "{:02X}", byte);
    }
    result
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use errors::FormatIssue;

    fn issue(result: SensorResult<impl std::fmt::Debug>) -> FormatIssue {
        match result {
            Err(SensorError::InvalidFormat(issue)) => issue,
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_spaced_example() {
        assert_eq!(normalize("DE AD BE EF").unwrap(), "DEADBEEF");
        assert_eq!(decode("DE AD BE EF").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(normalize("").unwrap(), "");
        assert!(decode("").unwrap().is_empty());
        assert!(decode("   ").unwrap().is_empty());
    }

    #[test]
    fn test_normalize_mixed_case_and_separators() {
        assert_eq!(normalize("de:ad-Be_eF").unwrap(), "DEADBEEF");
        assert_eq!(normalize("80,05, 01,2c").unwrap(), "8005012C");
        assert_eq!(normalize("\t80\n05\r\n").unwrap(), "8005");
    }

    #[test]
    fn test_normalize_strips_0x_prefixes() {
        assert_eq!(normalize("0x80 0X05 0x012C").unwrap(), "8005012C");
        assert_eq!(normalize("0xdeadbeef").unwrap(), "DEADBEEF");
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            issue(decode("zz")),
            FormatIssue::InvalidDigit { ch: 'z', position: 0 }
        );
        assert_eq!(
            issue(normalize("72 65 6g")),
            FormatIssue::InvalidDigit { ch: 'g', position: 5 }
        );
        assert_eq!(
            issue(normalize("AB°C")),
            FormatIssue::InvalidDigit { ch: '°', position: 2 }
        );
    }

    #[test]
    fn test_invalid_position_skips_prefix_and_separators() {
        assert_eq!(
            issue(normalize("0x80 zz")),
            FormatIssue::InvalidDigit { ch: 'z', position: 2 }
        );
        assert_eq!(
            issue(normalize("0x80:0x0g")),
            FormatIssue::InvalidDigit { ch: 'g', position: 3 }
        );
    }

    #[test]
    fn test_bare_prefix_rejected() {
        assert_eq!(
            issue(normalize("0x")),
            FormatIssue::InvalidDigit { ch: 'x', position: 1 }
        );
        assert_eq!(
            issue(normalize("80 0X")),
            FormatIssue::InvalidDigit { ch: 'X', position: 3 }
        );
    }

    #[test]
    fn test_odd_length_after_normalization() {
        assert_eq!(issue(decode("123")), FormatIssue::OddLength { len: 3 });
        assert_eq!(issue(decode("12 3")), FormatIssue::OddLength { len: 3 });
        assert_eq!(issue(normalize("f")), FormatIssue::OddLength { len: 1 });
    }

    #[test]
    fn test_invalid_character_reported_before_length() {
        assert!(matches!(
            issue(normalize("zzz")),
            FormatIssue::InvalidDigit { ch: 'z', .. }
        ));
    }

    #[test]
    fn test_round_trip_is_case_normalized() {
        for input in ["deadbeef", "00ff10", "807B8038", "aBcDeF0123456789"] {
            let bytes = decode(input).unwrap();
            assert_eq!(encode_upper(&bytes), input.to_ascii_uppercase());
        }
    }

    #[test]
    fn test_round_trip_every_byte_value() {
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(&encode_upper(&all)).unwrap(), all);
        assert_eq!(decode(&encode_spaced(&all)).unwrap(), all);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("0x80 05:01-2c").unwrap();
        assert_eq!(normalize(&once).unwrap(), once);
    }

    #[test]
    fn test_encode_upper_basic() {
        assert_eq!(encode_upper(&[0x12, 0x34, 0xAB]), "1234AB");
        assert_eq!(encode_upper(&[]), "");
        assert_eq!(encode_upper(&[0x00, 0x0F]), "000F");
    }

    #[test]
    fn test_encode_spaced() {
        assert_eq!(encode_spaced(&[0xDE, 0xAD, 0xBE, 0xEF]), "DE AD BE EF");
        assert_eq!(encode_spaced(&[0x0F]), "0F");
        assert_eq!(encode_spaced(&[]), "");
    }
}
