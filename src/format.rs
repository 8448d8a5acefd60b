//! RDA Format Description
//!
//! This module documents the Recursive Delimited Array text format as
//! implemented by this library. It contains no code.
//!
//! # Overview
//!
//! An RDA string encodes a tree of strings. Each nesting level has its own
//! delimiter character, and the string declares those characters up front, so
//! any value can be stored without choosing delimiters in advance and without
//! an external schema.
//!
//! # Structure
//!
//! ```text
//! |;,\|A;a,1;b|B
//! ^^^^^          header: delimiters "|;,", escape "\", then "|" again
//!      ^^^^^^^^^ payload
//! ```
//!
//! ## Header
//!
//! The header is read character by character until the first character
//! repeats:
//!
//! - The repeating character must be the first one, and at least two distinct
//!   characters must come before it.
//! - The last distinct character is the escape character; the ones before it
//!   are the delimiters, one per level, outermost first.
//! - Whitespace, control characters and the double quote never appear in a
//!   header.
//!
//! Input that does not start with a valid header is not an error: the whole
//! string is a single scalar of dimension 0.
//!
//! | Input            | Delimiters  | Escape | Payload      |
//! |------------------|-------------|--------|--------------|
//! | `\|\\|A\|B`      | `\|`        | `\`    | `A\|B`       |
//! | `&_;/&x&y`       | `&` `_` `;` | `/`    | `x&y`        |
//! | `Xyz`            | none        |        | scalar `Xyz` |
//!
//! ## Payload
//!
//! The payload is split at every unescaped level-0 delimiter; each section is
//! split at the level-1 delimiter, and so on down to the last declared level.
//! Sections at the last level are scalars. A trailing delimiter produces a
//! trailing empty section.
//!
//! ## Escaping
//!
//! Inside a scalar, every delimiter character and the escape character itself
//! are prefixed with the escape character:
//!
//! | Scalar   | Encoded (delimiters `\|;`, escape `\`) |
//! |----------|----------------------------------------|
//! | `a\|b`   | `a\\|b`                                |
//! | `x;y`    | `x\;y`                                 |
//! | `c:\`    | `c:\\`                                 |
//!
//! An escape character followed by anything else is an ordinary character.
//!
//! # Placeholders
//!
//! A position that was never assigned a value is a placeholder. It reads as
//! the empty string but differs from an assigned empty string. Placeholders at
//! the end of a child list are not written, and a node whose children are all
//! placeholders is written as if it had none. After parsing, every position
//! holds an assigned (possibly empty) value.
//!
//! # Formatted Layout (V2)
//!
//! Formatted output is meant for people to read. After the header comes a line
//! break and a space; every child but the first starts on a new line, nested
//! lists are indented, and every scalar is enclosed in double quotes:
//!
//! ```text
//! |;\|
//!  "SEC0"
//! |"SEC1"
//! |""
//! |"SEC3"
//! ```
//!
//! A payload whose first non-whitespace character is a line break is read as
//! formatted. Each scalar is then trimmed and one pair of enclosing quotes is
//! removed, so whitespace and line breaks outside quotes carry no meaning.
//!
//! # Dimension
//!
//! The dimension of a tree is its depth: 0 for a scalar, otherwise one more
//! than the deepest child. Encoding a tree needs one delimiter per dimension,
//! and delimiters are allocated from a fixed pool of 40 printable characters
//! (`| ; , ^ : ~ $ & # = * . ' @ _ % / ! ? > < + - { } [ ] ( ) `` ` `` then the
//! digits), so no tree can be deeper than 40 levels.
//!
//! # Equality
//!
//! Two trees are equal when they have the same shape and the same scalar values.
//! The delimiter characters and escape character are a property of the text
//! form only:
//!
//! ```text
//! |;\|a;b|c   ==   &_/&a_b&c
//! ```
