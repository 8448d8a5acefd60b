//! # rda
//!
//! Recursive Delimited Array (RDA): a self-describing text encoding for trees
//! of strings.
//!
//! ## What is RDA?
//!
//! An RDA string starts with a short header that declares one delimiter per
//! nesting level plus an escape character, followed by the payload:
//!
//! ```text
//! |;,\|A;a,1;b|B
//! ```
//!
//! Any string is a valid value, any depth up to the delimiter pool size is
//! encodable, and a string without a header is simply a scalar. See
//! [`format`] for the full description.
//!
//! ## Key Features
//!
//! - **Total addressing**: reading or writing any index or path succeeds,
//!   growing the tree with placeholders as needed
//! - **Self-describing**: delimiters are allocated on demand and written into
//!   the header, so no schema is needed to parse
//! - **Placeholders**: unassigned positions are distinct from empty strings
//!   and cost nothing in the encoded form
//! - **Two layouts**: compact (V1) and human-readable formatted (V2), detected
//!   automatically when parsing
//! - **Serde Compatible**: any `T: Serialize` can be stored positionally and
//!   read back with `T: Deserialize`
//!
//! ## Quick Start
//!
//! ### Building and addressing a tree
//!
//! ```rust
//! use rda::Rda;
//!
//! let mut rda = Rda::new();
//! rda.set_value(0, "Alice").unwrap();
//! rda.set_value_at(&[1, 0], "admin").unwrap();
//! rda.set_value_at(&[1, 1], "dev|ops").unwrap();
//!
//! let text = rda.to_string();
//! assert_eq!(text, "|;\\|Alice|admin;dev\\|ops");
//!
//! let mut parsed = Rda::parse(&text);
//! assert_eq!(parsed.get_value_at(&[1, 1]).unwrap(), "dev|ops");
//! assert_eq!(parsed.to_string(), text);
//! ```
//!
//! ### Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use rda::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "|\\|123|Alice|true");
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Formatted output
//!
//! ```rust
//! use rda::Rda;
//!
//! let rda = Rda::parse("|;\\|SEC0|SEC1||SEC3");
//! let formatted = rda.to_string_formatted();
//! assert_eq!(formatted, "|;\\|\r\n \"SEC0\"\r\n|\"SEC1\"\r\n|\"\"\r\n|\"SEC3\"");
//! assert_eq!(Rda::parse(&formatted), rda);
//! ```
//!
//! ## Limits
//!
//! New delimiters come from a fixed pool of [`MAX_DIMENSION`] characters, so a
//! tree with default delimiters can be at most that deep. Custom delimiters
//! outside the pool add levels, up to [`MAX_DIMENSION`] of them. Operations
//! that would need more levels fail with [`Error::DimensionLimit`] and leave
//! the tree unchanged. Input whose header declares more delimiters than that
//! is read as a plain scalar.
//!
//! An [`Rda`] shares its encoding between nodes through reference counting and
//! is not `Send`; use one tree from one thread at a time.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Parsing, reading and writing values
//! - **`addressing.rs`** - Path addressing, placeholders and compression
//! - **`formatting.rs`** - Compact and formatted layouts, custom encodings
//! - **`object_roundtrip.rs`** - Domain objects via serde and `RdaConvertible`
//!
//! Run any example with: `cargo run --example <name>`

pub mod convert;
pub mod de;
mod encoder;
pub mod encoding;
pub mod error;
pub mod escape;
pub mod format;
pub mod options;
pub mod parser;
mod rda;
pub mod ser;

pub use convert::RdaConvertible;
pub use de::Deserializer;
pub use encoding::{Encoding, MAX_DIMENSION};
pub use error::{Error, Result};
pub use options::{LineBreak, RdaOptions};
pub use rda::Rda;
pub use ser::RdaSerializer;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Convert any `T: Serialize` to an [`Rda`] tree.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let rda = rda::to_rda(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(rda.len(), 2);
/// assert_eq!(rda.child(1).map(|c| c.scalar_value()), Some("2"));
/// ```
///
/// # Errors
///
/// Returns [`Error::DimensionLimit`] if the value is nested too deeply.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_rda<T>(value: &T) -> Result<Rda>
where
    T: ?Sized + Serialize,
{
    value.serialize(RdaSerializer)
}

/// Serialize any `T: Serialize` to a compact RDA string.
///
/// # Errors
///
/// Returns [`Error::DimensionLimit`] if the value is nested too deeply.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, RdaOptions::default())
}

/// Serialize any `T: Serialize` to a formatted RDA string.
///
/// # Examples
///
/// ```rust
/// let text = rda::to_string_formatted(&vec!["a", "b"]).unwrap();
/// assert_eq!(text, "|\\|\r\n \"a\"\r\n|\"b\"");
/// ```
///
/// # Errors
///
/// Returns [`Error::DimensionLimit`] if the value is nested too deeply.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_formatted<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, RdaOptions::formatted())
}

/// Serialize any `T: Serialize` to an RDA string with custom options.
///
/// # Examples
///
/// ```rust
/// use rda::{LineBreak, RdaOptions};
///
/// let options = RdaOptions::formatted().with_line_break(LineBreak::Lf);
/// let text = rda::to_string_with_options(&(1, 2), options).unwrap();
/// assert_eq!(text, "|\\|\n \"1\"\n|\"2\"");
/// ```
///
/// # Errors
///
/// Returns [`Error::DimensionLimit`] if the value is nested too deeply.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: RdaOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(unambiguous(to_rda(value)?)?.to_string_with_options(options))
}

/// A bare scalar that would read back as a header is wrapped in a list of one,
/// which deserializes to the same value.
fn unambiguous(rda: Rda) -> Result<Rda> {
    if rda.dimension() == 0 && parser::parse_header(rda.scalar_value()).is_some() {
        Rda::from_children([rda])
    } else {
        Ok(rda)
    }
}

/// Serialize any `T: Serialize` to a writer as a compact RDA string.
///
/// # Examples
///
/// ```rust
/// let mut buffer = Vec::new();
/// rda::to_writer(&mut buffer, &["x", "y"]).unwrap();
/// assert_eq!(buffer, b"|\\|x|y");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, RdaOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: RdaOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from an [`Rda`] tree.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if a stored value cannot be read as the
/// type requested for its position.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_rda<T>(rda: &Rda) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(rda))
}

/// Deserialize an instance of type `T` from RDA text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = rda::from_str("|\\|1|2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Parsing never fails; errors come from values that do not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_rda(&Rda::parse(s))
}

/// Deserialize an instance of type `T` from an I/O stream of RDA text.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let values: Vec<u32> = rda::from_reader(Cursor::new(b"|\\|1|2|3")).unwrap();
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not UTF-8, or the data
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of RDA text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&alice()).unwrap();
        assert_eq!(text, "|;\\|123|Alice|true|admin;user");
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user_back, alice());
    }

    #[test]
    fn test_formatted_roundtrip() {
        let text = to_string_formatted(&alice()).unwrap();
        assert!(text.contains("\r\n"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user_back, alice());
    }

    #[test]
    fn test_to_rda() {
        let rda = to_rda(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(rda.children_values(), vec!["1", "2"]);
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice()).unwrap();
        let user_back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(user_back, alice());
    }

    #[test]
    fn test_header_like_scalar_is_wrapped() {
        assert_eq!(to_string(&1231).unwrap(), "|\\|1231");
        assert_eq!(from_str::<i32>("|\\|1231").unwrap(), 1231);
        assert_eq!(from_str::<String>(&to_string("aba").unwrap()).unwrap(), "aba");
        assert_eq!(to_string(&1234).unwrap(), "1234");
    }

    #[test]
    fn test_from_slice_invalid_utf8() {
        let result: Result<String> = from_slice(&[0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Custom(_))));
    }
}
