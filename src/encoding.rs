//! The encoding context shared by every node of one RDA tree.
//!
//! An [`Encoding`] is the ordered list of delimiter characters (one per nesting
//! level) plus the escape character. It is what the header section of an RDA
//! string declares, and it grows on demand as values are stored deeper in the
//! tree.
//!
//! ## Examples
//!
//! ```rust
//! use rda::Encoding;
//!
//! let mut encoding = Encoding::new();
//! assert!(encoding.delimiters().is_empty());
//!
//! encoding.extend(3).unwrap();
//! assert_eq!(encoding.delimiters(), &['|', ';', ',']);
//! assert_eq!(encoding.escape_char(), '\\');
//! ```

use crate::{Error, Result};

/// Candidate delimiter characters, in allocation order.
///
/// Printable, non-whitespace characters: symbols first, then digits. The double
/// quote and the backslash are left out, as they are reserved for quoting in
/// formatted output and for the default escape character.
pub const DEFAULT_DELIMITER_CANDIDATES: [char; 40] = [
    '|', ';', ',', '^', ':', '~', '$', '&', '#', '=', //
    '*', '.', '\'', '@', '_', '%', '/', '!', '?', '>', //
    '<', '+', '-', '{', '}', '[', ']', '(', ')', '`', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// The number of levels the candidate pool can supply, and so the deepest tree
/// an encoding with default delimiters can hold.
///
/// Delimiters outside the pool add levels on top of it. An encoding may hold
/// at most this many of them.
pub const MAX_DIMENSION: usize = DEFAULT_DELIMITER_CANDIDATES.len();

pub const DEFAULT_ESCAPE_CHAR: char = '\\';

/// Reserved for quoting scalars in formatted output.
pub const DOUBLE_QUOTE: char = '"';

/// Delimiters and escape character used by one RDA tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoding {
    delimiters: Vec<char>,
    escape_char: char,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding {
            delimiters: Vec::new(),
            escape_char: DEFAULT_ESCAPE_CHAR,
        }
    }
}

impl Encoding {
    /// Creates an encoding with no delimiters and the default escape character.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoding from a custom delimiter sequence and escape character.
    ///
    /// Every character must be printable and non-whitespace, must not be the
    /// double quote, and must appear only once across delimiters and escape.
    /// At most [`MAX_DIMENSION`] delimiters may come from outside
    /// [`DEFAULT_DELIMITER_CANDIDATES`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rda::Encoding;
    ///
    /// let encoding = Encoding::with_delimiters(['&', '_'], '/').unwrap();
    /// assert_eq!(encoding.delimiters(), &['&', '_']);
    ///
    /// assert!(Encoding::with_delimiters([' '], '/').is_err());
    /// assert!(Encoding::with_delimiters(['/'], '/').is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] naming the first unusable character.
    pub fn with_delimiters<I>(delimiters: I, escape_char: char) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let mut seen: Vec<char> = Vec::new();
        let mut outside_pool = 0;
        for ch in delimiters {
            check_usable(ch, &seen)?;
            if !is_candidate(ch) {
                outside_pool += 1;
                if outside_pool > MAX_DIMENSION {
                    return Err(Error::invalid_encoding(
                        ch,
                        &format!("more than {MAX_DIMENSION} delimiters outside the candidate pool"),
                    ));
                }
            }
            seen.push(ch);
        }
        check_usable(escape_char, &seen)?;
        Ok(Encoding {
            delimiters: seen,
            escape_char,
        })
    }

    /// Builds an encoding from a parsed header without validation.
    pub(crate) fn from_parts(delimiters: Vec<char>, escape_char: char) -> Self {
        Encoding {
            delimiters,
            escape_char,
        }
    }

    #[inline]
    #[must_use]
    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    #[inline]
    #[must_use]
    pub fn escape_char(&self) -> char {
        self.escape_char
    }

    /// The delimiter that separates the children of a node at `level`.
    #[inline]
    #[must_use]
    pub fn delimiter_at(&self, level: usize) -> Option<char> {
        self.delimiters.get(level).copied()
    }

    /// The delimiters needed to encode a subtree of `dimension` rooted at `level`.
    #[must_use]
    pub fn delimiters_in_use(&self, level: usize, dimension: usize) -> &[char] {
        let start = level.min(self.delimiters.len());
        let end = (level + dimension).min(self.delimiters.len());
        &self.delimiters[start..end]
    }

    /// Ensures at least `target_level` delimiters are available.
    ///
    /// Existing delimiters are kept; new ones are taken in order from
    /// [`DEFAULT_DELIMITER_CANDIDATES`], skipping characters already in use as
    /// a delimiter or as the escape character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionLimit`] when the candidate pool cannot supply
    /// enough characters, naming the most levels this encoding can reach. The
    /// encoding is left unchanged in that case.
    pub fn extend(&mut self, target_level: usize) -> Result<()> {
        if target_level <= self.delimiters.len() {
            return Ok(());
        }

        let mut extended = self.delimiters.clone();
        for candidate in DEFAULT_DELIMITER_CANDIDATES {
            if extended.len() == target_level {
                break;
            }
            if candidate != self.escape_char && !extended.contains(&candidate) {
                extended.push(candidate);
            }
        }

        if extended.len() < target_level {
            let limit = extended.len();
            tracing::debug!(requested = target_level, limit, "RDA dimension limit reached");
            return Err(Error::dimension_limit(target_level, limit));
        }

        tracing::debug!(from = self.delimiters.len(), to = extended.len(), "extended RDA delimiters");
        self.delimiters = extended;
        Ok(())
    }
}

/// Whether `ch` belongs to [`DEFAULT_DELIMITER_CANDIDATES`].
pub(crate) fn is_candidate(ch: char) -> bool {
    DEFAULT_DELIMITER_CANDIDATES.contains(&ch)
}

fn check_usable(ch: char, seen: &[char]) -> Result<()> {
    if let Some(reason) = unusable(ch) {
        return Err(Error::invalid_encoding(ch, reason));
    }
    if seen.contains(&ch) {
        return Err(Error::invalid_encoding(ch, "character used more than once"));
    }
    Ok(())
}

/// Why `ch` cannot be part of an encoding, if it can't.
fn unusable(ch: char) -> Option<&'static str> {
    if ch.is_whitespace() {
        Some("whitespace is not allowed")
    } else if ch.is_control() {
        Some("control characters are not allowed")
    } else if ch == DOUBLE_QUOTE {
        Some("the double quote is reserved for formatted output")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_from_empty() {
        let mut encoding = Encoding::new();
        encoding.extend(1).unwrap();
        assert_eq!(encoding.delimiters(), &['|']);

        encoding.extend(5).unwrap();
        assert_eq!(encoding.delimiters(), &['|', ';', ',', '^', ':']);
    }

    #[test]
    fn test_extend_is_noop_when_long_enough() {
        let mut encoding = Encoding::with_delimiters(['&', '_', ';'], '/').unwrap();
        encoding.extend(2).unwrap();
        assert_eq!(encoding.delimiters(), &['&', '_', ';']);
    }

    #[test]
    fn test_extend_skips_used_characters() {
        let mut encoding = Encoding::with_delimiters([';', '&'], '|').unwrap();
        encoding.extend(4).unwrap();
        assert_eq!(encoding.delimiters(), &[';', '&', ',', '^']);
    }

    #[test]
    fn test_extend_to_limit() {
        let mut encoding = Encoding::new();
        encoding.extend(MAX_DIMENSION).unwrap();
        assert_eq!(encoding.delimiters().len(), MAX_DIMENSION);
        assert_eq!(encoding.delimiters()[MAX_DIMENSION - 1], '9');
    }

    #[test]
    fn test_extend_beyond_limit_fails() {
        let mut encoding = Encoding::new();
        encoding.extend(3).unwrap();

        let err = encoding.extend(MAX_DIMENSION + 1).unwrap_err();
        assert_eq!(err, Error::dimension_limit(MAX_DIMENSION + 1, MAX_DIMENSION));
        assert_eq!(encoding.delimiters().len(), 3);
    }

    #[test]
    fn test_extend_past_pool_size_with_foreign_delimiters() {
        let mut encoding = Encoding::with_delimiters(['§', '¶'], '\\').unwrap();
        encoding.extend(MAX_DIMENSION + 2).unwrap();
        assert_eq!(encoding.delimiters().len(), MAX_DIMENSION + 2);
        assert_eq!(encoding.delimiters()[2], '|');

        let err = encoding.extend(MAX_DIMENSION + 3).unwrap_err();
        assert_eq!(err, Error::dimension_limit(MAX_DIMENSION + 3, MAX_DIMENSION + 2));
    }

    #[test]
    fn test_foreign_delimiters_are_capped() {
        let foreign = |count: u32| (0..count).filter_map(|i| char::from_u32(0x4E00 + i));
        let encoding = Encoding::with_delimiters(foreign(MAX_DIMENSION as u32), '\\').unwrap();
        assert_eq!(encoding.delimiters().len(), MAX_DIMENSION);

        let err = Encoding::with_delimiters(foreign(MAX_DIMENSION as u32 + 1), '\\').unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding { .. }));
    }

    #[test]
    fn test_custom_escape_reduces_pool() {
        // '|' is the escape, so only 39 candidates remain
        let mut encoding = Encoding::with_delimiters([], '|').unwrap();
        assert!(encoding.extend(MAX_DIMENSION - 1).is_ok());
        assert!(encoding.extend(MAX_DIMENSION).is_err());
    }

    #[test]
    fn test_with_delimiters_validation() {
        assert!(Encoding::with_delimiters(['\t'], '\\').is_err());
        assert!(Encoding::with_delimiters(['"'], '\\').is_err());
        assert!(Encoding::with_delimiters(['\u{7}'], '\\').is_err());
        assert!(Encoding::with_delimiters(['|', ';', '|'], '\\').is_err());
        assert!(Encoding::with_delimiters(['|', ';'], ';').is_err());
    }

    #[test]
    fn test_delimiters_in_use() {
        let encoding = Encoding::with_delimiters(['|', ';', ','], '\\').unwrap();
        assert_eq!(encoding.delimiters_in_use(0, 2), &['|', ';']);
        assert_eq!(encoding.delimiters_in_use(1, 2), &[';', ',']);
        assert_eq!(encoding.delimiters_in_use(2, 5), &[',']);
        assert!(encoding.delimiters_in_use(3, 1).is_empty());
        assert_eq!(encoding.delimiter_at(1), Some(';'));
        assert_eq!(encoding.delimiter_at(3), None);
    }
}
