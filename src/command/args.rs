//! Argument grammar shared by the handlers
//!
//! Each handler matches the whole command against its own anchored
//! pattern. Quoted free text is matched greedily and may span lines;
//! selectors are either `"title"` (no embedded quotes) or a single bare
//! token that [`Selector`] then classifies.

use regex::{Captures, Regex};

use super::{CommandError, Verb};
use crate::domain::{RowId, Selector};

/// Regex fragment for a selector token
pub const SELECTOR: &str = r#""[^"]*"|\S+"#;

/// Builds an anchored, dot-matches-newline pattern
pub fn pattern(body: &str) -> Regex {
    Regex::new(&format!(r"(?s)^{}\s*$", body)).expect("valid regex")
}

/// Matches a command against its grammar
pub fn capture<'c>(re: &Regex, verb: Verb, command: &'c str) -> Result<Captures<'c>, CommandError> {
    re.captures(command)
        .ok_or_else(|| CommandError::Parse(format!("expected `{}`", verb.usage())))
}

/// Text of a capture group that may not have participated
pub fn group<'c>(caps: &Captures<'c>, index: usize) -> Option<&'c str> {
    caps.get(index).map(|m| m.as_str())
}

/// Text of a capture group that always participates
pub fn text<'c>(caps: &Captures<'c>, index: usize) -> &'c str {
    group(caps, index).unwrap_or_default()
}

/// Parses a numeric capture
pub fn number(caps: &Captures<'_>, index: usize) -> Result<i64, CommandError> {
    let raw = text(caps, index);
    raw.parse()
        .map_err(|_| CommandError::Parse(format!("'{}' is not a valid number", raw)))
}

pub fn row_id(caps: &Captures<'_>, index: usize) -> Result<RowId, CommandError> {
    number(caps, index)
}

/// Parses a selector that must name an entity
pub fn named(caps: &Captures<'_>, index: usize) -> Result<Selector, CommandError> {
    Ok(Selector::parse_named(text(caps, index))?)
}

/// Parses a comma-separated id list
pub fn id_list(raw: &str) -> Result<Vec<RowId>, CommandError> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| CommandError::Parse(format!("'{}' is not a valid id", part)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static PAIR: LazyLock<Regex> =
        LazyLock::new(|| pattern(&format!(r#"move-list ({0}) to ({0})"#, SELECTOR)));

    #[test]
    fn selector_fragment_splits_quoted_titles() {
        let caps = capture(&PAIR, Verb::MoveList, r#"move-list "In progress" to "Work stuff""#)
            .unwrap();
        assert_eq!(text(&caps, 1), "\"In progress\"");
        assert_eq!(text(&caps, 2), "\"Work stuff\"");
    }

    #[test]
    fn mismatch_reports_usage() {
        let err = capture(&PAIR, Verb::MoveList, "move-list").unwrap_err();
        assert!(err.to_string().contains("move-list <list> to <board>"));
    }

    #[test]
    fn quoted_text_spans_lines() {
        let re = pattern(r#"add-board "(.*)""#);
        let caps = re.captures("add-board \"two\nlines\"").unwrap();
        assert_eq!(text(&caps, 1), "two\nlines");
    }

    #[test]
    fn parses_id_lists() {
        assert_eq!(id_list("1,2, 3").unwrap(), vec![1, 2, 3]);
        assert!(id_list("1,,2").is_err());
    }

    #[test]
    fn bare_word_selector_is_unsupported() {
        let caps = capture(&PAIR, Verb::MoveList, "move-list todo to 1").unwrap();
        assert!(matches!(
            named(&caps, 1),
            Err(CommandError::UnsupportedSelector(_))
        ));
    }
}
