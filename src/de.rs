//! Deserializing Rust values from [`Rda`] trees.
//!
//! This module provides the [`Deserializer`] that reads a parsed tree back
//! into any `T: Deserialize`, mirroring the mapping used by
//! [`RdaSerializer`](crate::RdaSerializer).
//!
//! ## Reading rules
//!
//! - Scalars (numbers, booleans, strings, chars) are parsed from the node's
//!   scalar value. On a composite node that is the value of its first child,
//!   which is how a scalar reads back after a round trip through text, where
//!   every node is nested down to the tree's full depth.
//! - A *blank* node (a placeholder, an empty string, or a chain of single
//!   children ending in one) reads as `None`, an empty sequence or an empty map.
//! - Structs and tuples read their fields by position; missing trailing fields
//!   read as placeholders.
//! - A scalar read as a sequence is a sequence of one.
//!
//! ## Usage
//!
//! ```rust
//! use rda::{from_rda, Rda};
//!
//! let rda = Rda::parse("|;\\|1;2|3");
//! let rows: Vec<Vec<u32>> = from_rda(&rda).unwrap();
//! assert_eq!(rows, vec![vec![1, 2], vec![3]]);
//! ```

use crate::{Error, Rda, Result};
use serde::de::{self, DeserializeSeed, Visitor};
use std::str::FromStr;

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                visitor.$visit(self.parse::<$ty>(stringify!($ty))?)
            }
        )*
    };
}

/// Reads Rust values out of an [`Rda`] node.
#[derive(Clone, Copy, Debug)]
pub struct Deserializer<'a> {
    // `None` stands for a position that does not exist in the tree.
    node: Option<&'a Rda>,
}

impl<'a> Deserializer<'a> {
    pub fn new(rda: &'a Rda) -> Self {
        Deserializer { node: Some(rda) }
    }

    fn at(node: Option<&'a Rda>) -> Self {
        Deserializer { node }
    }

    fn scalar(&self) -> &'a str {
        self.node.map_or("", Rda::scalar_value)
    }

    fn is_blank(&self) -> bool {
        self.node.map_or(true, is_blank)
    }

    fn elements(&self) -> Vec<Option<&'a Rda>> {
        match self.node {
            Some(node) if !is_blank(node) => {
                if node.is_empty() {
                    vec![Some(node)]
                } else {
                    node.children().iter().map(Some).collect()
                }
            }
            _ => Vec::new(),
        }
    }

    fn parse<T: FromStr>(&self, expected: &str) -> Result<T> {
        let value = self.scalar();
        value
            .parse()
            .map_err(|_| Error::type_mismatch(expected, value))
    }
}

fn is_blank(node: &Rda) -> bool {
    match node.children() {
        [] => node.scalar.as_deref().map_or(true, str::is_empty),
        [only] => is_blank(only),
        children => children.iter().all(Rda::is_placeholder),
    }
}

impl<'de, 'a> de::Deserializer<'de> for Deserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Some(node) if !node.is_placeholder() => {
                if node.is_empty() {
                    visitor.visit_str(node.scalar_value())
                } else {
                    let children = node.children().iter().map(Some).collect();
                    visitor.visit_seq(SeqDeserializer::new(children))
                }
            }
            _ => visitor.visit_unit(),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.scalar();
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(Error::type_mismatch("char", value)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_str(self.scalar())
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let bytes = self
            .elements()
            .into_iter()
            .map(|element| Deserializer::at(element).parse::<u8>("u8"))
            .collect::<Result<Vec<u8>>>()?;
        visitor.visit_byte_buf(bytes)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.is_blank() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(SeqDeserializer::new(self.elements()))
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(SeqDeserializer::padded(self.elements(), len))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(MapDeserializer::new(self.elements()))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_tuple(fields.len(), visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(EnumDeserializer { node: self.node })
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer<'a> {
    iter: std::vec::IntoIter<Option<&'a Rda>>,
}

impl<'a> SeqDeserializer<'a> {
    fn new(elements: Vec<Option<&'a Rda>>) -> Self {
        SeqDeserializer {
            iter: elements.into_iter(),
        }
    }

    fn padded(mut elements: Vec<Option<&'a Rda>>, len: usize) -> Self {
        if elements.len() < len {
            elements.resize(len, None);
        }
        Self::new(elements)
    }
}

impl<'de, 'a> de::SeqAccess<'de> for SeqDeserializer<'a> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(element) => seed.deserialize(Deserializer::at(element)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer<'a> {
    iter: std::vec::IntoIter<Option<&'a Rda>>,
    value: Option<Option<&'a Rda>>,
}

impl<'a> MapDeserializer<'a> {
    fn new(entries: Vec<Option<&'a Rda>>) -> Self {
        MapDeserializer {
            iter: entries.into_iter(),
            value: None,
        }
    }
}

/// Splits a `[key, value]` entry. A scalar entry is a key without a value.
fn split_entry(entry: Option<&Rda>) -> (Option<&Rda>, Option<&Rda>) {
    match entry {
        Some(node) if !node.is_empty() => (node.child(0), node.child(1)),
        other => (other, None),
    }
}

impl<'de, 'a> de::MapAccess<'de> for MapDeserializer<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(entry) => {
                let (key, value) = split_entry(entry);
                self.value = Some(value);
                seed.deserialize(Deserializer::at(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::custom("map value requested before its key"))?;
        seed.deserialize(Deserializer::at(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// A unit variant is its name; any other variant is `[name, field...]`.
struct EnumDeserializer<'a> {
    node: Option<&'a Rda>,
}

impl<'de, 'a> de::EnumAccess<'de> for EnumDeserializer<'a> {
    type Error = Error;
    type Variant = VariantDeserializer<'a>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Deserializer::at(self.node))?;
        let fields = match self.node {
            Some(node) if !node.is_empty() => node.children()[1..].iter().map(Some).collect(),
            _ => Vec::new(),
        };
        Ok((variant, VariantDeserializer { fields }))
    }
}

struct VariantDeserializer<'a> {
    fields: Vec<Option<&'a Rda>>,
}

impl<'de, 'a> de::VariantAccess<'de> for VariantDeserializer<'a> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        let value = self.fields.into_iter().next().flatten();
        seed.deserialize(Deserializer::at(value))
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(SeqDeserializer::padded(self.fields, len))
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(SeqDeserializer::padded(self.fields, fields.len()))
    }
}
