//! The recursive RDA node.
//!
//! An [`Rda`] is either a scalar string (dimension 0) or an ordered list of
//! child nodes. Every node of one tree shares a single [`Encoding`]; a node
//! knows its level (distance from the root), which selects the delimiter that
//! separates its children.
//!
//! ## Addressing
//!
//! Any index or path is a valid address. Reading or writing beyond the
//! current bounds grows the tree with placeholder nodes, and indexing into a
//! scalar pushes the scalar down to position 0:
//!
//! ```rust
//! use rda::Rda;
//!
//! let mut rda = Rda::parse("Xyz");
//! rda.set_value_at(&[1, 2, 3], "Two").unwrap();
//!
//! assert_eq!(rda.dimension(), 3);
//! assert_eq!(rda.scalar_value(), "Xyz");
//! assert_eq!(rda.get_value_at(&[1, 2, 3]).unwrap(), "Two");
//! assert!(rda.get_rda_at(&[7, 7]).unwrap().is_placeholder());
//! ```
//!
//! ## Ownership
//!
//! A node exclusively owns its children. The shared encoding is reference
//! counted, so an `Rda` is neither `Send` nor `Sync`; a tree must be used from
//! one thread at a time. Attaching a node to a tree moves it and switches the
//! whole subtree over to the tree's encoding.

use crate::encoder;
use crate::encoding::Encoding;
use crate::options::RdaOptions;
use crate::parser;
use crate::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::{Ref, RefCell};
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// A Recursive Delimited Array node.
pub struct Rda {
    pub(crate) children: Vec<Rda>,
    // `None` on a leaf marks a placeholder; on a composite it is only the
    // fallback written when every child is a placeholder.
    pub(crate) scalar: Option<String>,
    level: usize,
    encoding: Rc<RefCell<Encoding>>,
}

impl Default for Rda {
    fn default() -> Self {
        Rda::new()
    }
}

impl Rda {
    /// Creates an empty root node (a placeholder) with no delimiters allocated yet.
    #[must_use]
    pub fn new() -> Self {
        Self::with_encoding(Encoding::new())
    }

    /// Creates an empty root node that encodes with `encoding`.
    ///
    /// ```rust
    /// use rda::{Encoding, Rda};
    ///
    /// let mut rda = Rda::with_encoding(Encoding::with_delimiters(['&'], '/').unwrap());
    /// rda.add_value("a&b").unwrap();
    /// rda.add_value("c").unwrap();
    /// assert_eq!(rda.to_string(), "&/&a/&b&c");
    /// ```
    #[must_use]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Rda::detached(Rc::new(RefCell::new(encoding)), 0)
    }

    /// Creates a root node holding a scalar value.
    #[must_use]
    pub fn from_scalar(value: impl Into<String>) -> Self {
        let mut rda = Rda::new();
        rda.scalar = Some(value.into());
        rda
    }

    /// Creates a root node whose children are `children`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionLimit`](crate::Error::DimensionLimit) if the
    /// result would be too deep to encode.
    pub fn from_children<I>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = Rda>,
    {
        let mut rda = Rda::new();
        for child in children {
            rda.add_rda(child)?;
        }
        Ok(rda)
    }

    /// Parses an RDA string. Input without a valid header is a scalar.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let rda = Rda::parse("|;,\\|A;a,1;b|B");
    /// assert_eq!(rda.dimension(), 3);
    /// assert_eq!(rda.to_string(), "|;,\\|A;a,1;b|B");
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        parser::parse(input)
    }

    pub(crate) fn detached(encoding: Rc<RefCell<Encoding>>, level: usize) -> Self {
        Rda {
            children: Vec::new(),
            scalar: None,
            level,
            encoding,
        }
    }

    fn new_child(&self) -> Rda {
        Rda::detached(Rc::clone(&self.encoding), self.level + 1)
    }

    fn rehome(&mut self, encoding: &Rc<RefCell<Encoding>>, level: usize) {
        self.encoding = Rc::clone(encoding);
        self.level = level;
        for child in &mut self.children {
            child.rehome(encoding, level + 1);
        }
    }

    fn ensure_levels(&self, levels: usize) -> Result<()> {
        self.encoding.borrow_mut().extend(levels)
    }

    pub(crate) fn encoding_ref(&self) -> Ref<'_, Encoding> {
        self.encoding.borrow()
    }

    /// The maximum nesting depth below this node; 0 for a scalar.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.dimension() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Distance from the root of the tree.
    #[inline]
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of direct children.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this node has no children, i.e. it is a scalar or placeholder.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Rda] {
        &self.children
    }

    /// The child at `index`, without growing the tree.
    #[inline]
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Rda> {
        self.children.get(index)
    }

    /// Follows `path` through existing children only, without growing the tree.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let rda = Rda::parse("|;\\|a;b|c");
    /// assert_eq!(rda.lookup(&[0, 1]).map(Rda::scalar_value), Some("b"));
    /// assert!(rda.lookup(&[3]).is_none());
    /// ```
    #[must_use]
    pub fn lookup(&self, path: &[usize]) -> Option<&Rda> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// A copy of the encoding shared by this node's tree.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding.borrow().clone()
    }

    #[must_use]
    pub fn escape_char(&self) -> char {
        self.encoding.borrow().escape_char()
    }

    /// The delimiter separating this node's children, if allocated.
    #[must_use]
    pub fn child_delimiter(&self) -> Option<char> {
        self.encoding.borrow().delimiter_at(self.level)
    }

    /// The delimiters written in this node's header.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let mut rda = Rda::parse("|;,\\|a,b;c|d");
    /// assert_eq!(rda.delimiters_in_use(), vec!['|', ';', ',']);
    /// assert_eq!(rda.get_rda(0).unwrap().delimiters_in_use(), vec![';', ',']);
    /// ```
    #[must_use]
    pub fn delimiters_in_use(&self) -> Vec<char> {
        self.encoding
            .borrow()
            .delimiters_in_use(self.level, self.dimension())
            .to_vec()
    }

    /// The string this node represents: its own scalar for a leaf, otherwise
    /// the scalar value of its first child. A placeholder reads as `""`.
    #[must_use]
    pub fn scalar_value(&self) -> &str {
        match self.children.first() {
            Some(first) => first.scalar_value(),
            None => self.scalar.as_deref().unwrap_or(""),
        }
    }

    /// Makes this node a scalar, dropping any children.
    pub fn set_scalar_value(&mut self, value: impl Into<String>) {
        self.children.clear();
        self.scalar = Some(value.into());
    }

    /// Makes this node a placeholder, dropping its value and children.
    pub fn clear(&mut self) {
        self.children.clear();
        self.scalar = None;
    }

    /// Returns `true` if no value was ever assigned to this node or below it.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let mut rda = Rda::new();
    /// rda.set_value(1, "").unwrap();
    /// assert!(rda.get_rda(0).unwrap().is_placeholder());
    /// assert!(!rda.get_rda(1).unwrap().is_placeholder());
    /// assert_eq!(rda.get_value(0).unwrap(), "");
    /// ```
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        if self.children.is_empty() {
            self.scalar.is_none()
        } else {
            self.children.iter().all(Rda::is_placeholder)
        }
    }

    pub(crate) fn last_non_placeholder_index(&self) -> Option<usize> {
        self.children.iter().rposition(|child| !child.is_placeholder())
    }

    /// Makes `index` addressable: a scalar is pushed down to position 0 and
    /// missing positions are filled with placeholders.
    fn expand(&mut self, index: usize) {
        if self.children.is_empty() {
            let mut first = self.new_child();
            first.scalar = self.scalar.take();
            self.children.push(first);
        }
        while self.children.len() <= index {
            let placeholder = self.new_child();
            self.children.push(placeholder);
        }
    }

    /// The child at `index`, growing the tree as needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionLimit`](crate::Error::DimensionLimit) if a new
    /// nesting level is needed and none can be allocated.
    pub fn get_rda(&mut self, index: usize) -> Result<&mut Rda> {
        self.ensure_levels(self.level + 1)?;
        self.expand(index);
        Ok(&mut self.children[index])
    }

    /// The node at `path`, growing the tree as needed. An empty path is `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionLimit`](crate::Error::DimensionLimit) if the
    /// path is deeper than the encoding can support.
    pub fn get_rda_at(&mut self, path: &[usize]) -> Result<&mut Rda> {
        match path.split_first() {
            None => Ok(self),
            Some((&index, rest)) => self.get_rda(index)?.get_rda_at(rest),
        }
    }

    /// Stores `rda` at `index`, or a placeholder when given `None`.
    ///
    /// The attached subtree adopts this tree's encoding.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let mut base = Rda::parse("|\\|a|b");
    /// base.set_rda(1, Rda::parse("|\\|x|y")).unwrap();
    /// assert_eq!(base.to_string(), "|;\\|a|x;y");
    ///
    /// base.set_rda(1, None).unwrap();
    /// assert_eq!(base.to_string(), "|\\|a");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionLimit`](crate::Error::DimensionLimit) if the
    /// attached subtree is too deep for this position. The tree is unchanged.
    pub fn set_rda(&mut self, index: usize, rda: impl Into<Option<Rda>>) -> Result<()> {
        let rda = rda.into();
        let depth = rda.as_ref().map_or(0, Rda::dimension);
        self.ensure_levels(self.level + depth + 1)?;
        self.expand(index);

        let slot = match rda {
            Some(mut child) => {
                child.rehome(&self.encoding, self.level + 1);
                child
            }
            None => self.new_child(),
        };
        self.children[index] = slot;
        Ok(())
    }

    /// Stores `rda` at `path`. An empty path replaces the content of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionLimit`](crate::Error::DimensionLimit) if the
    /// result would be too deep to encode.
    pub fn set_rda_at(&mut self, path: &[usize], rda: impl Into<Option<Rda>>) -> Result<()> {
        match path.split_last() {
            Some((&index, parent)) => self.get_rda_at(parent)?.set_rda(index, rda),
            None => match rda.into() {
                Some(mut replacement) => {
                    self.ensure_levels(self.level + replacement.dimension())?;
                    replacement.rehome(&self.encoding, self.level);
                    self.children = std::mem::take(&mut replacement.children);
                    self.scalar = replacement.scalar.take();
                    Ok(())
                }
                None => {
                    self.clear();
                    Ok(())
                }
            },
        }
    }

    /// The scalar value at `index`, `""` if none was stored.
    ///
    /// # Errors
    ///
    /// See [`Rda::get_rda`].
    pub fn get_value(&mut self, index: usize) -> Result<String> {
        Ok(self.get_rda(index)?.scalar_value().to_string())
    }

    /// The scalar value at `path`, `""` if none was stored.
    ///
    /// # Errors
    ///
    /// See [`Rda::get_rda_at`].
    pub fn get_value_at(&mut self, path: &[usize]) -> Result<String> {
        Ok(self.get_rda_at(path)?.scalar_value().to_string())
    }

    /// Stores a scalar at `index`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// See [`Rda::set_rda`].
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.set_rda(index, Rda::from_scalar(value))
    }

    /// Stores a scalar at `path`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// See [`Rda::get_rda_at`].
    pub fn set_value_at(&mut self, path: &[usize], value: impl Into<String>) -> Result<()> {
        self.get_rda_at(path)?.set_scalar_value(value);
        Ok(())
    }

    /// Appends a scalar after the last child.
    ///
    /// # Errors
    ///
    /// See [`Rda::set_rda`].
    pub fn add_value(&mut self, value: impl Into<String>) -> Result<()> {
        self.set_value(self.children.len(), value)
    }

    /// Appends `rda` (or a placeholder for `None`) after the last child.
    ///
    /// # Errors
    ///
    /// See [`Rda::set_rda`].
    pub fn add_rda(&mut self, rda: impl Into<Option<Rda>>) -> Result<()> {
        self.set_rda(self.children.len(), rda)
    }

    /// The scalar values of the direct children, or this node's own value if
    /// it is a scalar.
    #[must_use]
    pub fn children_values(&self) -> Vec<&str> {
        if self.children.is_empty() {
            vec![self.scalar_value()]
        } else {
            self.children.iter().map(Rda::scalar_value).collect()
        }
    }

    /// Replaces the children with one scalar child per value. No values makes
    /// this node a placeholder.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let mut rda = Rda::new();
    /// rda.set_children_values(["a", "b|c"]).unwrap();
    /// assert_eq!(rda.to_string(), "|\\|a|b\\|c");
    /// assert_eq!(rda.children_values(), vec!["a", "b|c"]);
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Rda::get_rda`].
    pub fn set_children_values<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let children: Vec<Rda> = values
            .into_iter()
            .map(|value| {
                let mut child = self.new_child();
                child.scalar = Some(value.into());
                child
            })
            .collect();

        if children.is_empty() {
            self.clear();
            return Ok(());
        }
        self.ensure_levels(self.level + 1)?;
        self.children = children;
        self.scalar = None;
        Ok(())
    }

    /// Structural equality: same dimension, same number of children, and
    /// recursively equal children, with scalars compared by value. The
    /// delimiter characters of either tree play no part.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let a = Rda::parse("|;\\|a;b|c");
    /// let b = Rda::parse("&_/&a_b&c");
    /// assert!(a.content_equal(&b));
    /// ```
    #[must_use]
    pub fn content_equal(&self, other: &Rda) -> bool {
        let dimension = self.dimension();
        if dimension != other.dimension() || self.len() != other.len() {
            return false;
        }
        if dimension == 0 {
            return self.scalar_value() == other.scalar_value();
        }
        self.children
            .iter()
            .zip(&other.children)
            .all(|(mine, theirs)| mine.content_equal(theirs))
    }

    /// Removes nesting levels that carry no branching.
    ///
    /// Children are compressed first. A node whose only non-placeholder child
    /// is at index 0, and is a scalar, becomes that scalar.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let mut rda = Rda::parse("A");
    /// rda.get_rda_at(&[0, 0, 3]).unwrap();
    /// assert_eq!(rda.dimension(), 3);
    ///
    /// rda.compress();
    /// assert_eq!(rda.dimension(), 0);
    /// assert_eq!(rda.to_string(), "A");
    /// ```
    pub fn compress(&mut self) {
        if self.children.is_empty() {
            return;
        }
        for child in &mut self.children {
            child.compress();
        }
        if self.children[1..].iter().any(|child| !child.is_placeholder()) {
            return;
        }
        if self.children[0].children.is_empty() {
            let scalar = self.children[0].scalar.take();
            self.children.clear();
            self.scalar = scalar;
        }
    }

    /// Compresses this node, then encodes it.
    pub fn to_string_minimal(&mut self) -> String {
        self.compress();
        self.to_string()
    }

    /// Encodes this node in the formatted (V2) layout.
    ///
    /// ```rust
    /// use rda::Rda;
    ///
    /// let rda = Rda::parse("|\\|A|B");
    /// assert_eq!(rda.to_string_formatted(), "|\\|\r\n \"A\"\r\n|\"B\"");
    /// ```
    #[must_use]
    pub fn to_string_formatted(&self) -> String {
        self.to_string_with_options(RdaOptions::formatted())
    }

    /// Encodes this node with custom output options.
    #[must_use]
    pub fn to_string_with_options(&self, options: RdaOptions) -> String {
        encoder::encode(self, &options)
    }

    /// The compact payload section alone, without the header.
    #[must_use]
    pub fn payload(&self) -> String {
        encoder::payload(self, &RdaOptions::new())
    }

    fn copy_into(&self, encoding: &Rc<RefCell<Encoding>>) -> Rda {
        Rda {
            children: self
                .children
                .iter()
                .map(|child| child.copy_into(encoding))
                .collect(),
            scalar: self.scalar.clone(),
            level: self.level,
            encoding: Rc::clone(encoding),
        }
    }
}

/// Deep copy with a private copy of the encoding.
impl Clone for Rda {
    fn clone(&self) -> Self {
        let encoding = Rc::new(RefCell::new(self.encoding()));
        self.copy_into(&encoding)
    }
}

impl fmt::Debug for Rda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rda")
            .field("level", &self.level)
            .field("scalar", &self.scalar)
            .field("children", &self.children)
            .finish()
    }
}

/// The compact (V1) encoding.
impl fmt::Display for Rda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encoder::encode(self, &RdaOptions::new()))
    }
}

impl PartialEq for Rda {
    fn eq(&self, other: &Self) -> bool {
        self.content_equal(other)
    }
}

impl Eq for Rda {}

impl FromStr for Rda {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Rda::parse(s))
    }
}

impl From<&str> for Rda {
    fn from(value: &str) -> Self {
        Rda::from_scalar(value)
    }
}

impl From<String> for Rda {
    fn from(value: String) -> Self {
        Rda::from_scalar(value)
    }
}

/// Scalars serialize as strings, placeholders as unit, composites as sequences.
impl Serialize for Rda {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.children.is_empty() {
            return match &self.scalar {
                Some(value) => serializer.serialize_str(value),
                None => serializer.serialize_unit(),
            };
        }

        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
        for child in &self.children {
            seq.serialize_element(child)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Rda {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct RdaVisitor;

        impl<'de> Visitor<'de> for RdaVisitor {
            type Value = Rda;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, a number, a boolean, null or a sequence")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Rda, E> {
                Ok(Rda::from_scalar(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Rda, E> {
                Ok(Rda::from_scalar(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Rda, E> {
                Ok(Rda::from_scalar(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Rda, E> {
                Ok(Rda::from_scalar(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Rda, E> {
                Ok(Rda::from_scalar(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Rda, E> {
                Ok(Rda::from_scalar(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Rda, E> {
                Ok(Rda::new())
            }

            fn visit_none<E>(self) -> std::result::Result<Rda, E> {
                Ok(Rda::new())
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Rda, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Rda, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut rda = Rda::new();
                while let Some(child) = seq.next_element::<Rda>()? {
                    rda.add_rda(child).map_err(de::Error::custom)?;
                }
                Ok(rda)
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Rda, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut rda = Rda::new();
                while let Some((key, value)) = map.next_entry::<Rda, Rda>()? {
                    let entry = Rda::from_children([key, value]).map_err(de::Error::custom)?;
                    rda.add_rda(entry).map_err(de::Error::custom)?;
                }
                Ok(rda)
            }
        }

        deserializer.deserialize_any(RdaVisitor)
    }
}
