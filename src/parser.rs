//! Parsing of RDA strings into [`Rda`] trees.
//!
//! Parsing runs in two steps:
//!
//! 1. **Header**: the leading characters up to the first repeat of the first
//!    character declare the delimiters and the escape character. Without a
//!    valid header the whole input is a dimension-0 scalar.
//! 2. **Payload**: the rest of the string is split recursively, one delimiter
//!    per level, honoring escape sequences.
//!
//! Parsing never fails. Formatted (V2) input is recognised by a line break
//! before any other non-whitespace character of the payload.

use crate::encoding::{is_candidate, Encoding, DOUBLE_QUOTE, MAX_DIMENSION};
use crate::escape::unescape;
use crate::Rda;
use std::cell::RefCell;
use std::rc::Rc;

/// The textual layout of a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatVersion {
    /// Compact, every character is significant.
    V1,
    /// Line breaks, indentation and enclosing quotes are for display only.
    V2,
}

impl FormatVersion {
    /// Detects the version of a payload.
    ///
    /// ```rust
    /// use rda::parser::FormatVersion;
    ///
    /// assert_eq!(FormatVersion::detect("A|B"), FormatVersion::V1);
    /// assert_eq!(FormatVersion::detect("  \r\n \"A\"\r\n|\"B\""), FormatVersion::V2);
    /// assert_eq!(FormatVersion::detect("   "), FormatVersion::V1);
    /// ```
    #[must_use]
    pub fn detect(payload: &str) -> Self {
        for ch in payload.chars() {
            if ch == '\n' {
                return FormatVersion::V2;
            }
            if !ch.is_whitespace() {
                return FormatVersion::V1;
            }
        }
        FormatVersion::V1
    }

    #[inline]
    #[must_use]
    pub const fn is_formatted(self) -> bool {
        matches!(self, FormatVersion::V2)
    }
}

/// Reads the header section of `input`.
///
/// Returns the declared encoding and the payload that follows the header, or
/// `None` when `input` has no valid header. A header declaring more than
/// [`MAX_DIMENSION`] delimiters outside the candidate pool is not valid.
///
/// ```rust
/// use rda::parser::parse_header;
///
/// let (encoding, payload) = parse_header("|;,\\|A;a,1;b|B").unwrap();
/// assert_eq!(encoding.delimiters(), &['|', ';', ',']);
/// assert_eq!(encoding.escape_char(), '\\');
/// assert_eq!(payload, "A;a,1;b|B");
///
/// assert!(parse_header("Xyz").is_none());
/// assert!(parse_header("||").is_none());
/// ```
#[must_use]
pub fn parse_header(input: &str) -> Option<(Encoding, &str)> {
    let mut header: Vec<char> = Vec::new();
    let mut outside_pool = 0;
    for (offset, ch) in input.char_indices() {
        if ch.is_whitespace() || ch.is_control() || ch == DOUBLE_QUOTE {
            return None;
        }
        if header.contains(&ch) {
            // Only the primary delimiter may close the header, after at least
            // one delimiter and the escape character.
            if ch != header[0] || header.len() < 2 {
                return None;
            }
            let escape_char = header.pop()?;
            if outside_pool - usize::from(!is_candidate(escape_char)) > MAX_DIMENSION {
                tracing::debug!(limit = MAX_DIMENSION, "RDA header declares too many delimiters");
                return None;
            }
            let payload = &input[offset + ch.len_utf8()..];
            return Some((Encoding::from_parts(header, escape_char), payload));
        }
        header.push(ch);
        if !is_candidate(ch) {
            // The escape character may be one of them.
            outside_pool += 1;
            if outside_pool > MAX_DIMENSION + 1 {
                tracing::debug!(limit = MAX_DIMENSION, "RDA header declares too many delimiters");
                return None;
            }
        }
    }
    None
}

/// Splits `payload` at every `delimiter` not protected by `escape_char`.
///
/// The result always has at least one element; a trailing delimiter yields a
/// trailing empty element.
///
/// ```rust
/// use rda::parser::split_sections;
///
/// assert_eq!(split_sections("a|b\\|c|", '|', '\\'), vec!["a", "b\\|c", ""]);
/// assert_eq!(split_sections("", '|', '\\'), vec![""]);
/// ```
#[must_use]
pub fn split_sections(payload: &str, delimiter: char, escape_char: char) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut escaping = false;
    for (offset, ch) in payload.char_indices() {
        if ch == escape_char {
            escaping = !escaping;
            continue;
        }
        if !escaping && ch == delimiter {
            sections.push(&payload[start..offset]);
            start = offset + ch.len_utf8();
        }
        escaping = false;
    }
    sections.push(&payload[start..]);
    sections
}

/// Parses an RDA string into a tree.
pub(crate) fn parse(input: &str) -> Rda {
    let Some((encoding, payload)) = parse_header(input) else {
        tracing::debug!(len = input.len(), "no RDA header, input is a scalar");
        return Rda::from_scalar(input);
    };

    let version = FormatVersion::detect(payload);
    tracing::trace!(?version, delimiters = encoding.delimiters().len(), "parsing RDA payload");

    let home = Rc::new(RefCell::new(encoding));
    let encoding = home.borrow();
    let parser = PayloadParser {
        encoding: &encoding,
        home: &home,
        formatted: version.is_formatted(),
    };
    parser.parse_node(payload, 0)
}

struct PayloadParser<'a> {
    encoding: &'a Encoding,
    home: &'a Rc<RefCell<Encoding>>,
    formatted: bool,
}

impl PayloadParser<'_> {
    fn parse_node(&self, payload: &str, level: usize) -> Rda {
        let mut node = Rda::detached(Rc::clone(self.home), level);
        let escape_char = self.encoding.escape_char();

        // Kept on composites too, as the fallback when every child is a placeholder.
        node.scalar = Some(unescape(
            payload,
            self.encoding.delimiters(),
            escape_char,
            self.formatted,
        ));

        if let Some(delimiter) = self.encoding.delimiter_at(level) {
            node.children = split_sections(payload, delimiter, escape_char)
                .into_iter()
                .map(|section| self.parse_node(section, level + 1))
                .collect();
        }
        node
    }
}
