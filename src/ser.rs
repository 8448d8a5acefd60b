//! Serializing Rust values into [`Rda`] trees.
//!
//! This module provides [`RdaSerializer`], a serde `Serializer` whose output
//! is an [`Rda`] node rather than text. RDA has no type information, so every
//! value is mapped onto strings and positions:
//!
//! | Rust value                     | RDA node                                   |
//! |--------------------------------|--------------------------------------------|
//! | bool, number, char, string     | scalar holding its text form               |
//! | `None`, `()`, unit struct      | placeholder                                |
//! | sequence, tuple, struct        | one child per element, in order            |
//! | map                            | one `[key, value]` child per entry         |
//! | unit variant                   | scalar holding the variant name            |
//! | newtype/tuple/struct variant   | `[name, field...]`                         |
//!
//! Struct field names are not stored; fields are identified by position.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let rda = rda::to_rda(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(rda.to_string(), "|\\|1|2");
//! ```
//!
//! An empty sequence serializes to a placeholder, the same as `None`.

use crate::{Error, Rda, Result};
use serde::{ser, Serialize};

/// A serde `Serializer` that builds an [`Rda`] tree.
pub struct RdaSerializer;

pub struct SerializeVec {
    children: Vec<Rda>,
}

pub struct SerializeMap {
    entries: Vec<Rda>,
    current_key: Option<Rda>,
}

impl ser::Serializer for RdaSerializer {
    type Ok = Rda;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeVec;
    type SerializeStructVariant = SerializeVec;

    fn serialize_bool(self, v: bool) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_i16(self, v: i16) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_i32(self, v: i32) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_i64(self, v: i64) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_u16(self, v: u16) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_u32(self, v: u32) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_u64(self, v: u64) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_u128(self, v: u128) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Rda> {
        Ok(Rda::from_scalar(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Rda> {
        Ok(Rda::from_scalar(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Rda> {
        Rda::from_children(v.iter().map(|b| Rda::from_scalar(b.to_string())))
    }

    fn serialize_none(self) -> Result<Rda> {
        Ok(Rda::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Rda>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Rda> {
        Ok(Rda::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Rda> {
        Ok(Rda::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Rda> {
        Ok(Rda::from_scalar(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Rda>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Rda>
    where
        T: ?Sized + Serialize,
    {
        Rda::from_children([Rda::from_scalar(variant), to_rda_node(value)?])
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::for_variant(variant, len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::for_variant(variant, len))
    }
}

impl SerializeVec {
    fn with_capacity(len: usize) -> Self {
        SerializeVec {
            children: Vec::with_capacity(len),
        }
    }

    fn for_variant(variant: &'static str, len: usize) -> Self {
        let mut children = Vec::with_capacity(len + 1);
        children.push(Rda::from_scalar(variant));
        SerializeVec { children }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.children.push(to_rda_node(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Rda> {
        Rda::from_children(self.children)
    }
}

impl SerializeMap {
    fn with_capacity(len: usize) -> Self {
        SerializeMap {
            entries: Vec::with_capacity(len),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Rda;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Rda> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Rda;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Rda> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Rda;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Rda> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Rda;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Rda> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeVec {
    type Ok = Rda;
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Rda> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeVec {
    type Ok = Rda;
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Rda> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Rda;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_rda_node(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entries
            .push(Rda::from_children([key, to_rda_node(value)?])?);
        Ok(())
    }

    fn end(self) -> Result<Rda> {
        Rda::from_children(self.entries)
    }
}

fn to_rda_node<T: Serialize + ?Sized>(value: &T) -> Result<Rda> {
    value.serialize(RdaSerializer)
}
