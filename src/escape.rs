//! Escaping of scalar text against a delimiter set.
//!
//! Inside a payload, any occurrence of a delimiter or of the escape character
//! itself is prefixed with the escape character. Formatted (V2) output also
//! wraps each scalar in double quotes so that leading and trailing whitespace
//! survives the trimming applied when formatted input is parsed.
//!
//! ```rust
//! use rda::escape::{escape, unescape};
//!
//! let escaped = escape("a|b\\c", &['|', ';'], '\\', false);
//! assert_eq!(escaped, "a\\|b\\\\c");
//! assert_eq!(unescape(&escaped, &['|', ';'], '\\', false), "a|b\\c");
//! ```

use crate::encoding::DOUBLE_QUOTE;

/// Escapes `value` so it can be embedded in a payload using `delimiters`.
#[must_use]
pub fn escape(value: &str, delimiters: &[char], escape_char: char, formatted: bool) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    if formatted {
        escaped.push(DOUBLE_QUOTE);
    }
    for ch in value.chars() {
        if ch == escape_char || delimiters.contains(&ch) {
            escaped.push(escape_char);
        }
        escaped.push(ch);
    }
    if formatted {
        escaped.push(DOUBLE_QUOTE);
    }
    escaped
}

/// Reverses [`escape`].
///
/// An escape sequence collapses to the protected character only when that
/// character is the escape character or one of `delimiters`; any other escape
/// character, including a trailing one, is kept literally. With `formatted`,
/// surrounding whitespace and at most one pair of enclosing double quotes are
/// removed first.
#[must_use]
pub fn unescape(text: &str, delimiters: &[char], escape_char: char, formatted: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    if text.trim().chars().count() < 2 {
        return if formatted {
            text.trim().to_string()
        } else {
            text.to_string()
        };
    }

    let body = if formatted {
        let trimmed = text.trim();
        let trimmed = trimmed.strip_prefix(DOUBLE_QUOTE).unwrap_or(trimmed);
        trimmed.strip_suffix(DOUBLE_QUOTE).unwrap_or(trimmed)
    } else {
        text
    };

    let chars: Vec<char> = body.chars().collect();
    let Some(&last) = chars.last() else {
        return String::new();
    };

    let mut unescaped = String::with_capacity(body.len());
    let mut escaping = false;
    for pair in chars.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        escaping = current == escape_char && !escaping;
        if escaping && (next == escape_char || delimiters.contains(&next)) {
            continue;
        }
        unescaped.push(current);
    }
    unescaped.push(last);
    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIMITERS: [char; 3] = ['|', ';', ','];

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("abc", &DELIMITERS, '\\', false), "abc");
        assert_eq!(escape("", &DELIMITERS, '\\', false), "");
    }

    #[test]
    fn test_escape_delimiters_and_escape() {
        assert_eq!(escape("SE;|C1d4", &DELIMITERS, '\\', false), "SE\\;\\|C1d4");
        assert_eq!(escape("SE;|C1d4", &[';', ','], '\\', false), "SE\\;|C1d4");
        assert_eq!(escape("a\\b", &DELIMITERS, '\\', false), "a\\\\b");
    }

    #[test]
    fn test_escape_formatted_quotes() {
        assert_eq!(escape(" x ", &DELIMITERS, '\\', true), "\" x \"");
        assert_eq!(escape("", &DELIMITERS, '\\', true), "\"\"");
    }

    #[test]
    fn test_unescape_sequences() {
        assert_eq!(unescape("SE\\;\\|C1d4", &DELIMITERS, '\\', false), "SE;|C1d4");
        assert_eq!(unescape("a\\\\b", &DELIMITERS, '\\', false), "a\\b");
        assert_eq!(unescape("s3\\s4", &DELIMITERS, '\\', false), "s3\\s4");
    }

    #[test]
    fn test_unescape_trailing_escape_kept() {
        assert_eq!(unescape("x\\", &DELIMITERS, '\\', false), "x\\");
    }

    #[test]
    fn test_unescape_short_strings() {
        assert_eq!(unescape("", &DELIMITERS, '\\', false), "");
        assert_eq!(unescape(" a ", &DELIMITERS, '\\', false), " a ");
        assert_eq!(unescape(" a ", &DELIMITERS, '\\', true), "a");
        assert_eq!(unescape("\r\n", &DELIMITERS, '\\', true), "");
    }

    #[test]
    fn test_unescape_formatted_strips_one_quote_pair() {
        assert_eq!(unescape("  \"\t S1d \" \n", &DELIMITERS, '\\', true), "\t S1d ");
        assert_eq!(unescape(" \" S1e", &DELIMITERS, '\\', true), " S1e");
        assert_eq!(unescape("\"\"", &DELIMITERS, '\\', true), "");
        assert_eq!(unescape("\"\"x\"\"", &DELIMITERS, '\\', true), "\"x\"");
    }

    #[test]
    fn test_unescape_custom_escape() {
        assert_eq!(unescape("A/;B", &['&', '_', ';'], '/', false), "A;B");
        assert_eq!(unescape("n1 /||| ", &['&', '_', ';'], '/', false), "n1 /||| ");
    }

    #[test]
    fn test_escape_roundtrip() {
        for value in ["", "a", "|", "\\", "a\\", "\\|;,", "x;y|z,w\\\\", " lead", "trail "] {
            let escaped = escape(value, &DELIMITERS, '\\', false);
            assert_eq!(unescape(&escaped, &DELIMITERS, '\\', false), value);

            let quoted = escape(value, &DELIMITERS, '\\', true);
            assert_eq!(unescape(&quoted, &DELIMITERS, '\\', true), value);
        }
    }
}
