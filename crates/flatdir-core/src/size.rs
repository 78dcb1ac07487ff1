//! Size thresholds and the human-readable size parser.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SizeParseError;

/// `<number>[ ][unit][b]`, anchored on both ends.
static SIZE_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s?([kKmMgGtT])?[bB]?$").expect("Invalid size spec regex")
});

/// Multipliers for k, m, g, t (in that order).
const POWERS_BINARY: [u64; 4] = [1 << 10, 1 << 20, 1 << 30, 1 << 40];
const POWERS_DECIMAL: [u64; 4] = [
    1_000,
    1_000_000,
    1_000_000_000,
    1_000_000_000_000,
];

/// Which family of multipliers a unit letter selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeBase {
    /// Powers of 1024 (`1k` = 1024 bytes).
    #[default]
    Binary,
    /// Powers of 1000 (`1k` = 1000 bytes).
    Decimal,
}

impl SizeBase {
    /// Multiplier for a unit letter, or `None` if the letter is unknown.
    fn multiplier(self, unit: Option<char>) -> Option<u64> {
        let index = match unit.map(|c| c.to_ascii_lowercase()) {
            None => return Some(1),
            Some('k') => 0,
            Some('m') => 1,
            Some('g') => 2,
            Some('t') => 3,
            Some(_) => return None,
        };
        let table = match self {
            Self::Binary => &POWERS_BINARY,
            Self::Decimal => &POWERS_DECIMAL,
        };
        Some(table[index])
    }
}

/// An exact byte count parsed from a size spec.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SizeThreshold(u64);

impl SizeThreshold {
    /// Wrap an exact byte count.
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// The threshold in bytes.
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Parse a size spec with binary multipliers.
    pub fn parse(text: &str) -> Result<Self, SizeParseError> {
        parse_size(text, SizeBase::Binary)
    }

    /// Human-readable rendering, e.g. `1.50 KiB`.
    pub fn human(self) -> String {
        humansize::format_size(self.0, humansize::BINARY)
    }
}

impl From<u64> for SizeThreshold {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

impl From<SizeThreshold> for u64 {
    fn from(threshold: SizeThreshold) -> Self {
        threshold.0
    }
}

impl PartialEq<u64> for SizeThreshold {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<u64> for SizeThreshold {
    fn partial_cmp(&self, other: &u64) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl FromStr for SizeThreshold {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SizeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

/// Convert a human-readable size spec such as `"4500"`, `"1.5kb"` or `"2MB"`
/// into an exact byte count.
///
/// The unit letter (k, m, g, t; any case) picks the multiplier from `base`;
/// a trailing `b`/`B` is accepted and ignored. Fractional values are rounded
/// to the nearest byte, ties to even.
///
/// # Examples
///
/// ```
/// use flatdir_core::{SizeBase, parse_size};
///
/// assert_eq!(parse_size("4500", SizeBase::Binary).unwrap().bytes(), 4500);
/// assert_eq!(parse_size("1.5kb", SizeBase::Binary).unwrap().bytes(), 1536);
/// assert_eq!(parse_size("2MB", SizeBase::Decimal).unwrap().bytes(), 2_000_000);
/// ```
pub fn parse_size(text: &str, base: SizeBase) -> Result<SizeThreshold, SizeParseError> {
    let caps = SIZE_SPEC
        .captures(text.trim())
        .ok_or_else(|| SizeParseError::invalid(text))?;

    let value: f64 = caps[1].parse().map_err(|_| SizeParseError::invalid(text))?;
    let unit = caps.get(2).and_then(|m| m.as_str().chars().next());
    let multiplier = base
        .multiplier(unit)
        .ok_or_else(|| SizeParseError::invalid(text))?;

    let bytes = (value * multiplier as f64).round_ties_even();
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return Err(SizeParseError::overflow(text));
    }

    Ok(SizeThreshold(bytes as u64))
}
