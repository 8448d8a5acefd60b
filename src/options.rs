//! Output options for RDA encoding.
//!
//! This module provides types to customize how a tree is written:
//!
//! - [`RdaOptions`]: Main configuration struct
//! - [`LineBreak`]: Line terminator used by formatted output
//!
//! Options only affect writing. Parsing detects the layout on its own, so any
//! combination of options reads back to the same content.
//!
//! ## Examples
//!
//! ```rust
//! use rda::{LineBreak, Rda, RdaOptions};
//!
//! let rda = Rda::parse("|\\|A|B");
//!
//! // Compact output, identical to `to_string`
//! assert_eq!(rda.to_string_with_options(RdaOptions::new()), "|\\|A|B");
//!
//! // Formatted output with Unix line endings
//! let options = RdaOptions::formatted().with_line_break(LineBreak::Lf);
//! assert_eq!(rda.to_string_with_options(options), "|\\|\n \"A\"\n|\"B\"");
//! ```

/// Line terminator for formatted output.
///
/// # Examples
///
/// ```rust
/// use rda::LineBreak;
///
/// assert_eq!(LineBreak::CrLf.as_str(), "\r\n");
/// assert_eq!(LineBreak::Lf.as_str(), "\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineBreak {
    #[default]
    CrLf,
    Lf,
}

impl LineBreak {
    /// Returns the string representation of this line break.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineBreak::CrLf => "\r\n",
            LineBreak::Lf => "\n",
        }
    }
}

/// Configuration options for RDA output.
///
/// # Examples
///
/// ```rust
/// use rda::{LineBreak, RdaOptions};
///
/// // Default compact options
/// let options = RdaOptions::new();
///
/// // Formatted with 2-space indentation and CRLF line breaks
/// let options = RdaOptions::formatted();
///
/// // Custom configuration
/// let options = RdaOptions::formatted()
///     .with_indent(4)
///     .with_line_break(LineBreak::Lf);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RdaOptions {
    /// Write the V2 layout: line breaks, indentation and quoted scalars.
    pub formatted: bool,
    /// Spaces added per nesting level. Only affects formatted output.
    pub indent: usize,
    pub line_break: LineBreak,
}

impl Default for RdaOptions {
    fn default() -> Self {
        RdaOptions {
            formatted: false,
            indent: 2,
            line_break: LineBreak::default(),
        }
    }
}

impl RdaOptions {
    /// Creates default options (compact output).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rda::RdaOptions;
    ///
    /// let options = RdaOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.formatted);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for formatted (V2) output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rda::RdaOptions;
    ///
    /// let options = RdaOptions::formatted();
    /// assert!(options.formatted);
    /// ```
    #[must_use]
    pub fn formatted() -> Self {
        RdaOptions {
            formatted: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rda::RdaOptions;
    ///
    /// let options = RdaOptions::formatted().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }
}
