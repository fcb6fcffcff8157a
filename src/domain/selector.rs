//! Selectors address an entity in a command argument
//!
//! - `"Title"` - quoted title, resolved within the relevant parent scope
//! - `123` - row id, resolved directly
//! - `next` / `prev` - relative list, only valid as a card-move target

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::records::RowId;

#[derive(Debug, Error, PartialEq)]
pub enum SelectorError {
    #[error("Unsupported selector '{0}': use a quoted title or a numeric id")]
    Unsupported(String),

    #[error("Id '{0}' is out of range")]
    OutOfRange(String),
}

/// Direction for relative list targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
}

/// A parsed selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Decoded title, without the surrounding quotes
    Title(String),
    Id(RowId),
    Relative(Step),
}

impl Selector {
    /// Parses a selector that must name an entity (no relative steps)
    pub fn parse_named(s: &str) -> Result<Self, SelectorError> {
        match s.parse()? {
            Selector::Relative(_) => Err(SelectorError::Unsupported(s.to_string())),
            named => Ok(named),
        }
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
            return Ok(Selector::Title(s[1..s.len() - 1].to_string()));
        }

        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            return s
                .parse()
                .map(Selector::Id)
                .map_err(|_| SelectorError::OutOfRange(s.to_string()));
        }

        match s {
            "next" => Ok(Selector::Relative(Step::Next)),
            "prev" => Ok(Selector::Relative(Step::Prev)),
            _ => Err(SelectorError::Unsupported(s.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Title(title) => write!(f, "\"{}\"", title),
            Selector::Id(id) => write!(f, "{}", id),
            Selector::Relative(Step::Next) => f.write_str("next"),
            Selector::Relative(Step::Prev) => f.write_str("prev"),
        }
    }
}
