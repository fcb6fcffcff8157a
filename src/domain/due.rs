//! Relative due-date intervals (`3d`, `2w`, `1m`, `1y`)

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

const DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum IntervalError {
    #[error("Invalid interval '{0}': expected <N><d|w|m|y>")]
    Invalid(String),
}

/// Unit of a due interval. Months are 30 days, years 365 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueUnit {
    Day,
    Week,
    Month,
    Year,
}

impl DueUnit {
    pub fn seconds(&self) -> i64 {
        match self {
            DueUnit::Day => DAY,
            DueUnit::Week => DAY * 7,
            DueUnit::Month => DAY * 30,
            DueUnit::Year => DAY * 365,
        }
    }

    fn suffix(&self) -> char {
        match self {
            DueUnit::Day => 'd',
            DueUnit::Week => 'w',
            DueUnit::Month => 'm',
            DueUnit::Year => 'y',
        }
    }
}

/// A count of due units, e.g. `12d`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueInterval {
    pub count: i64,
    pub unit: DueUnit,
}

impl DueInterval {
    /// Length of the interval in seconds
    pub fn seconds(&self) -> i64 {
        self.count.saturating_mul(self.unit.seconds())
    }

    /// Epoch seconds of `now` plus this interval
    pub fn due_from(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp().saturating_add(self.seconds())
    }
}

impl FromStr for DueInterval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IntervalError::Invalid(s.to_string());

        let unit = match s.chars().last() {
            Some('d') => DueUnit::Day,
            Some('w') => DueUnit::Week,
            Some('m') => DueUnit::Month,
            Some('y') => DueUnit::Year,
            _ => return Err(invalid()),
        };

        let digits = &s[..s.len() - 1];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let count = digits.parse().map_err(|_| invalid())?;
        Ok(Self { count, unit })
    }
}

impl fmt::Display for DueInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}
