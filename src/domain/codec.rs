//! Reversible text encoding for stored titles and content
//!
//! Free-form text ends up in tab-separated result tables and newline
//! separated command streams, so the characters that carry meaning in
//! those formats are replaced by bracketed markers before storage:
//!
//! | Character | Marker |
//! |-----------|--------|
//! | `\t` | `<|TAB|>` |
//! | `\n` | `<|NEWLINE|>` |
//! | `\r` | `<|RETURN|>` |
//! | `'` | `<|QUOTE|>` |
//!
//! `decode(encode(s)) == s` for every `s` that does not already contain
//! one of the markers.

const ESCAPES: &[(char, &str)] = &[
    ('\t', "<|TAB|>"),
    ('\n', "<|NEWLINE|>"),
    ('\r', "<|RETURN|>"),
    ('\'', "<|QUOTE|>"),
];

/// Encodes text for storage
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ESCAPES.iter().find(|(c, _)| *c == ch) {
            Some((_, marker)) => out.push_str(marker),
            None => out.push(ch),
        }
    }
    out
}

/// Decodes stored text back to its original form
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if let Some((escaped, marker)) = ESCAPES.iter().find(|(_, m)| rest.starts_with(m)) {
            out.push(*escaped);
            rest = &rest[marker.len()..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    out
}

/// Returns true if the text contains one of the reserved markers
pub fn contains_marker(text: &str) -> bool {
    ESCAPES.iter().any(|(_, marker)| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode("a\tb"), "a<|TAB|>b");
        assert_eq!(encode("line one\nline two"), "line one<|NEWLINE|>line two");
        assert_eq!(encode("it's"), "it<|QUOTE|>s");
        assert_eq!(encode("plain"), "plain");
    }

    #[test]
    fn encoded_text_is_table_safe() {
        let encoded = encode("a\tb\nc\r'd'");
        assert!(!encoded.contains('\t'));
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('\r'));
        assert!(!encoded.contains('\''));
    }

    #[test]
    fn decodes_all_markers_together() {
        let original = "tab\there\nnew 'quoted'\r\n";
        assert_eq!(decode(&encode(original)), original);
    }

    #[test]
    fn decode_leaves_partial_markers_alone() {
        assert_eq!(decode("<|TAB"), "<|TAB");
        assert_eq!(decode("<|<|TAB|>|>"), "<|\t|>");
        assert_eq!(decode("héllo <|NEWLINE|> wörld"), "héllo \n wörld");
    }

    #[test]
    fn detects_markers() {
        assert!(contains_marker("x<|QUOTE|>y"));
        assert!(!contains_marker("x<|QUOTE y"));
    }

    proptest! {
        #[test]
        fn round_trips_marker_free_text(s in "[a-z '\t\n\r<|>A-Z\"]{0,40}") {
            prop_assume!(!contains_marker(&s));
            prop_assert_eq!(decode(&encode(&s)), s);
        }
    }
}
