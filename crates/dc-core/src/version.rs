//! Migration versions.
//!
//! A version is the canonical, fixed-width encoding of the timestamp that
//! prefixes a migration directory name: `YYYYMMDD-HHMMSSd` where `d` is the
//! tenths-of-a-second digit. Because every component is zero-padded to a
//! fixed width, comparing two versions as plain strings orders them
//! chronologically. The token `"0"` is reserved for "no migrations applied"
//! and sorts before every real version.
//!
//! The two digits after `HHMM` are not validated as seconds. Directories
//! named by earlier releases carry hundredths of a second there (`00`-`99`),
//! and keeping the digits as they are preserves the order of those names.

use crate::error::{CoreError, CoreResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

const INITIAL: &str = "0";
const DATE_DIGITS: usize = 8;
const CANONICAL_LEN: usize = 16;

/// Canonical migration version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(String);

/// A directory name split into its version and free-text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Canonical version derived from the timestamp prefix
    pub version: Version,
    /// Text following the timestamp (may be empty)
    pub label: String,
}

impl Version {
    /// The "nothing applied" sentinel.
    pub fn initial() -> Self {
        Self(INITIAL.to_string())
    }

    /// Whether this is the "nothing applied" sentinel.
    pub fn is_initial(&self) -> bool {
        self.0 == INITIAL
    }

    /// Parse a version token, accepting the sentinel `"0"`, the canonical
    /// 16-character form and the shorter `HHMM` / `HHMMSS` time encodings.
    pub fn parse(value: &str) -> CoreResult<Self> {
        let value = value.trim();
        if value == INITIAL {
            return Ok(Self::initial());
        }
        let (date, time) = value.split_once('-').ok_or_else(|| CoreError::InvalidVersion {
            value: value.to_string(),
            reason: "expected YYYYMMDD-HHMM[SS[d]]".to_string(),
        })?;
        encode(date, time).map_err(|reason| CoreError::InvalidVersion {
            value: value.to_string(),
            reason,
        })
    }

    /// Split a migration directory name (`<date>-<time>[-<label>]`) into its
    /// canonical version and label.
    pub fn from_dir_name(name: &str) -> CoreResult<ParsedName> {
        let invalid = |reason: String| CoreError::InvalidMigrationName {
            name: name.to_string(),
            reason,
        };

        let (date, rest) = name
            .split_once('-')
            .ok_or_else(|| invalid("expected a YYYYMMDD-HHMM[SS[d]] prefix".to_string()))?;
        let (time, label) = match rest.split_once('-') {
            Some((time, label)) => (time, label),
            None => (rest, ""),
        };
        let version = encode(date, time).map_err(invalid)?;

        Ok(ParsedName {
            version,
            label: label.to_string(),
        })
    }

    /// Version for a point in time, truncated to tenths of a second.
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        let tenths = ts.nanosecond() % 1_000_000_000 / 100_000_000;
        Self(format!("{}{}", ts.format("%Y%m%d-%H%M%S"), tenths))
    }

    /// Return the canonical token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Form written to the bookkeeping table.
    ///
    /// A zero tenths digit is dropped so the marker fits the 15-character
    /// column of databases migrated by earlier releases. [`Version::parse`]
    /// restores the canonical form on read.
    pub fn marker(&self) -> &str {
        match self.0.strip_suffix('0') {
            Some(short) if self.0.len() == CANONICAL_LEN => short,
            _ => &self.0,
        }
    }
}

/// Validate the date and time components and produce the canonical token.
fn encode(date: &str, time: &str) -> Result<Version, String> {
    if date.len() != DATE_DIGITS || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("date '{date}' must be exactly 8 digits (YYYYMMDD)"));
    }
    if !time.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("time '{time}' must contain only digits"));
    }

    let (hhmmss, tenths) = match time.len() {
        4 => (format!("{time}00"), "0"),
        6 => (time.to_string(), "0"),
        7 => (time[..6].to_string(), &time[6..]),
        n => {
            return Err(format!(
                "time '{time}' has {n} digits, expected 4 (HHMM), 6 (HHMMSS) or 7 (HHMMSSd)"
            ))
        }
    };

    let number = |s: &str| s.parse::<u32>().map_err(|e| e.to_string());
    let year = number(&date[0..4])? as i32;
    let month = number(&date[4..6])?;
    let day = number(&date[6..8])?;
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(format!("'{date}' is not a calendar date"));
    }

    let hour = number(&hhmmss[0..2])?;
    let minute = number(&hhmmss[2..4])?;
    if NaiveTime::from_hms_opt(hour, minute, 0).is_none() {
        return Err(format!("'{time}' does not start with a valid HHMM"));
    }

    Ok(Version(format!("{date}-{hhmmss}{tenths}")))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
