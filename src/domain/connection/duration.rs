//! Duration value object used for the connect timeout

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Value object representing a time duration such as `5s` or `1m30s`.
/// Immutable and validated on creation; never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Create a Duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Supported formats: "30s", "1m", "2m30s", "90s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError { input: s.to_string() };
        let input = s.trim().to_lowercase();

        let mut minutes: Option<u64> = None;
        let mut seconds: Option<u64> = None;
        let mut digits = String::new();

        for ch in input.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                // minutes must come before seconds and each unit appears once
                'm' if !digits.is_empty() && minutes.is_none() && seconds.is_none() => {
                    minutes = Some(digits.parse().map_err(|_| invalid())?);
                    digits.clear();
                }
                's' if !digits.is_empty() && seconds.is_none() => {
                    seconds = Some(digits.parse().map_err(|_| invalid())?);
                    digits.clear();
                }
                _ => return Err(invalid()),
            }
        }

        if !digits.is_empty() || (minutes.is_none() && seconds.is_none()) {
            return Err(invalid());
        }

        let total_secs = minutes
            .unwrap_or(0)
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds.unwrap_or(0)))
            .ok_or_else(invalid)?;
        let total_ms = total_secs.checked_mul(1000).ok_or_else(invalid)?;

        if total_ms == 0 {
            return Err(invalid());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}
