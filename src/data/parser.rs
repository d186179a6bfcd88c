//! Field-level parsing for the payroll and performance tables
//!
//! Decodes raw bytes (UTF-8 for the payroll snapshot, UTF-16LE for the yearly
//! performance export) and turns individual cells into numbers and flags.
//! Nothing here coerces a bad cell to zero: unusable values come back as
//! `None` and the caller drops the record from that derivation.
//!
//! # Example
//!
//! ```
//! use mlbpay::data::parser::{is_postseason, parse_currency};
//!
//! assert_eq!(parse_currency("$1,234,567"), Some(1_234_567.0));
//! assert!(is_postseason(" Wild Card "));
//! ```

use encoding_rs::{UTF_16LE, UTF_8};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

use crate::error::LoadError;

/// Characters stripped from currency cells before parsing
static CURRENCY_NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[$,"\s]"#).unwrap());

/// Decode a UTF-16LE export, consuming a leading BOM.
///
/// Decoding with any other encoding garbles every cell, so malformed input
/// is an error rather than something to paper over.
pub fn decode_utf16le(bytes: &[u8], source_name: &str) -> Result<String, LoadError> {
    let (decoded, had_errors) = UTF_16LE.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(LoadError::Encoding {
            encoding: "UTF-16LE",
            source_name: source_name.to_string(),
        });
    }
    Ok(decoded.into_owned())
}

/// Decode a UTF-8 (mostly ASCII) table; stray bytes become U+FFFD
pub fn decode_utf8(bytes: &[u8], source_name: &str) -> String {
    let (decoded, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        warn!("{} is not clean UTF-8; invalid bytes were replaced", source_name);
    }
    decoded.into_owned()
}

/// Parse a currency cell such as `"$245,500,000"` into dollars
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned = CURRENCY_NOISE.replace_all(raw, "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a plain numeric cell (wins, amounts without symbols)
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a season year
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .ok()
        .or_else(|| {
            parse_number(trimmed)
                .filter(|y| y.fract() == 0.0 && *y >= i32::MIN as f64 && *y <= i32::MAX as f64)
                .map(|y| y as i32)
        })
}

/// Round to one decimal place, as average wins are shown
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// True for a playoff outcome: wildcard or division winner.
///
/// Case and surrounding whitespace are ignored, as are spaces inside the
/// word, so "Wild Card" counts the same as "wildcard".
pub fn is_postseason(raw: &str) -> bool {
    let normalized: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    matches!(normalized.as_str(), "wildcard" | "divisionwinner")
}

/// Simplified payroll classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayrollClass {
    Active,
    Buried,
    Injured,
    Retained,
    Other,
}

impl PayrollClass {
    /// Collapse a free-text payroll type by substring, first match wins
    pub fn classify(label: &str) -> Self {
        if label.contains("Active") {
            PayrollClass::Active
        } else if label.contains("Buried") {
            PayrollClass::Buried
        } else if label.contains("Injured") {
            PayrollClass::Injured
        } else if label.contains("Retained") {
            PayrollClass::Retained
        } else {
            PayrollClass::Other
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PayrollClass::Active => "Active",
            PayrollClass::Buried => "Buried",
            PayrollClass::Injured => "Injured",
            PayrollClass::Retained => "Retained",
            PayrollClass::Other => "Other",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PayrollClass::Active => "Healthy players on the team",
            PayrollClass::Buried => "MLB players in the Minor Leagues",
            PayrollClass::Injured => "Injured players on the team",
            PayrollClass::Retained => "Money spent on a non-roster player (trade/release)",
            PayrollClass::Other => "Other expenses",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PayrollClass::Active => "#1f77b4",
            PayrollClass::Buried => "#ff7f0e",
            PayrollClass::Injured => "#d62728",
            PayrollClass::Retained => "#2ca02c",
            PayrollClass::Other => "#9ca3af",
        }
    }

    /// "Other" is rolled up but kept out of the pie
    pub fn is_displayed(&self) -> bool {
        !matches!(self, PayrollClass::Other)
    }
}

impl fmt::Display for PayrollClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_strips_symbols() {
        assert_eq!(parse_currency("$1,234,567"), Some(1_234_567.0));
        assert_eq!(parse_currency("1234567"), Some(1_234_567.0));
        assert_eq!(parse_currency("\" $ 98,000,000.50 \""), Some(98_000_000.5));
    }

    #[test]
    fn test_parse_currency_missing() {
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("n/a"), None);
    }

    #[test]
    fn test_parse_currency_idempotent() {
        let once = parse_currency("$1,234,567").unwrap();
        let twice = parse_currency(&once.to_string()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_postseason_flag() {
        assert!(is_postseason("Wild Card"));
        assert!(is_postseason("wildcard"));
        assert!(is_postseason("Division Winner"));
        assert!(is_postseason("  DIVISION WINNER "));
        assert!(!is_postseason("Missed Playoffs"));
        assert!(!is_postseason(""));
        assert!(!is_postseason("World Series Winner"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(PayrollClass::classify("Active 26-Man Roster"), PayrollClass::Active);
        assert_eq!(PayrollClass::classify("Buried Contracts"), PayrollClass::Buried);
        assert_eq!(PayrollClass::classify("Injured List"), PayrollClass::Injured);
        assert_eq!(PayrollClass::classify("Retained Salary"), PayrollClass::Retained);
        assert_eq!(PayrollClass::classify("Signing Bonuses"), PayrollClass::Other);
        assert!(!PayrollClass::Other.is_displayed());
    }

    #[test]
    fn test_decode_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Team\tWins".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_utf16le(&bytes, "test").unwrap(), "Team\tWins");
    }

    #[test]
    fn test_decode_utf16le_odd_length_is_error() {
        let err = decode_utf16le(&[0x54, 0x00, 0x65], "test").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_year_and_round() {
        assert_eq!(parse_year("2019"), Some(2019));
        assert_eq!(parse_year(" 2019.0 "), Some(2019));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("2019.7"), None);
        assert_eq!(parse_year("1e12"), None);
        assert_eq!(round_tenths(88.46), 88.5);
    }
}
