//! Typed values rendered as template context.
//!
//! A [`Payload`] is either one record or a collection of records:
//!
//! | Payload | Key | Resulting context |
//! |---------|-----|-------------------|
//! | `Record(&friend)` | `Some("friend")` | `{"friend": {...}}` |
//! | `Record(&friend)` | `None` | the record's own fields |
//! | `Collection(&friends)` | `Some("friends")` | `{"friends": [...]}` |
//! | `Collection(&friends)` | `None` | [`StencilError::MissingKeyForCollection`] |
//!
//! Sets, or lists wrapped in a `Record`, are caught too: before a keyless
//! record is encoded, its top-level shape is checked, and a sequence fails
//! with [`StencilError::MissingKeyForCollection`] without being serialized.
//! Keyless records that serialize to a scalar fail with
//! [`StencilError::NotAMapping`].

use std::fmt;

use minijinja::Value;
use serde::ser::{self, Impossible, Serializer};
use serde::Serialize;

use crate::context::RenderContext;
use crate::error::StencilError;

/// A typed value to expose to a template.
#[derive(Debug)]
pub enum Payload<'a, T> {
    /// A single structured value.
    Record(&'a T),
    /// A sequence of values; always needs a key.
    Collection(&'a [T]),
}

impl<T> Clone for Payload<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Payload<'_, T> {}

impl<'a, T: Serialize> Payload<'a, T> {
    pub fn record(value: &'a T) -> Self {
        Payload::Record(value)
    }

    pub fn collection(values: &'a [T]) -> Self {
        Payload::Collection(values)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Payload::Collection(_))
    }

    /// Builds the template context for this payload.
    ///
    /// With a key, the whole payload is bound to it. Without one, a record's
    /// top-level fields become the context keys.
    pub fn into_context(self, key: Option<&str>) -> Result<RenderContext, StencilError> {
        match (self, key) {
            (Payload::Collection(_), None) => Err(StencilError::MissingKeyForCollection),
            (Payload::Record(value), Some(key)) => bind(key, value),
            (Payload::Collection(values), Some(key)) => bind(key, values),
            (Payload::Record(value), None) => flatten_record(value),
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, StencilError> {
    serde_json::to_value(value).map_err(|source| StencilError::EncodeFailed { source })
}

fn bind<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<RenderContext, StencilError> {
    let encoded = encode(value)?;
    Ok([(key, Value::from_serialize(&encoded))].into_iter().collect())
}

fn flatten_record<T: Serialize>(value: &T) -> Result<RenderContext, StencilError> {
    if top_level_shape(value) == Some(Shape::Sequence) {
        return Err(StencilError::MissingKeyForCollection);
    }

    match encode(value)? {
        serde_json::Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), Value::from_serialize(v)))
            .collect()),
        other => Err(StencilError::NotAMapping {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Top-level shape of a serializable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Map,
    Sequence,
    Scalar,
}

/// Returns the shape `value` serializes to, without serializing its contents.
///
/// `None` means the value's `Serialize` impl failed before revealing a shape.
fn top_level_shape<T: Serialize + ?Sized>(value: &T) -> Option<Shape> {
    match value.serialize(ShapeScan) {
        Ok(shape) | Err(ShapeStop::Found(shape)) => Some(shape),
        Err(ShapeStop::Custom) => None,
    }
}

/// Serializer that stops at the first compound it sees.
struct ShapeScan;

#[derive(Debug)]
enum ShapeStop {
    Found(Shape),
    Custom,
}

impl fmt::Display for ShapeStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeStop::Found(shape) => write!(f, "found {:?}", shape),
            ShapeStop::Custom => f.write_str("serialization failed"),
        }
    }
}

impl std::error::Error for ShapeStop {}

impl ser::Error for ShapeStop {
    fn custom<M: fmt::Display>(_msg: M) -> Self {
        ShapeStop::Custom
    }
}

type Stop = Impossible<Shape, ShapeStop>;

impl Serializer for ShapeScan {
    type Ok = Shape;
    type Error = ShapeStop;
    type SerializeSeq = Stop;
    type SerializeTuple = Stop;
    type SerializeTupleStruct = Stop;
    type SerializeTupleVariant = Stop;
    type SerializeMap = Stop;
    type SerializeStruct = Stop;
    type SerializeStructVariant = Stop;

    fn serialize_bool(self, _v: bool) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_i8(self, _v: i8) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_i16(self, _v: i16) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_i32(self, _v: i32) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_i64(self, _v: i64) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_i128(self, _v: i128) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_u8(self, _v: u8) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_u16(self, _v: u16) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_u32(self, _v: u32) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_u64(self, _v: u64) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_u128(self, _v: u128) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_f32(self, _v: f32) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_f64(self, _v: f64) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_char(self, _v: char) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_str(self, _v: &str) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    // serde_json writes bytes as an array of numbers
    fn serialize_bytes(self, _v: &[u8]) -> Result<Shape, ShapeStop> {
        Ok(Shape::Sequence)
    }

    fn serialize_none(self) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_some<V: Serialize + ?Sized>(self, value: &V) -> Result<Shape, ShapeStop> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<Shape, ShapeStop> {
        Ok(Shape::Scalar)
    }

    fn serialize_newtype_struct<V: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &V,
    ) -> Result<Shape, ShapeStop> {
        value.serialize(self)
    }

    // externally tagged: `{"Variant": value}`
    fn serialize_newtype_variant<V: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &V,
    ) -> Result<Shape, ShapeStop> {
        Ok(Shape::Map)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Stop, ShapeStop> {
        Err(ShapeStop::Found(Shape::Sequence))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Stop, ShapeStop> {
        Err(ShapeStop::Found(Shape::Sequence))
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Stop, ShapeStop> {
        Err(ShapeStop::Found(Shape::Sequence))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Stop, ShapeStop> {
        Err(ShapeStop::Found(Shape::Map))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Stop, ShapeStop> {
        Err(ShapeStop::Found(Shape::Map))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Stop, ShapeStop> {
        Err(ShapeStop::Found(Shape::Map))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Stop, ShapeStop> {
        Err(ShapeStop::Found(Shape::Map))
    }
}
