//! Value model.
//!
//! A value is a type-tagged payload. An [`UnversionedValue`] additionally
//! carries the positional id of the column it belongs to, so it is only
//! meaningful together with the schema that assigned that id.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a column or value.
///
/// The set is closed. Each variant has a stable one-byte wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ValueType {
    /// Explicit null.
    Null = 0x02,
    /// 64-bit signed integer.
    Int64 = 0x03,
    /// 64-bit unsigned integer.
    Uint64 = 0x04,
    /// 64-bit floating point.
    Double = 0x05,
    /// Boolean.
    Boolean = 0x06,
    /// UTF-8 string.
    String = 0x10,
    /// Opaque, already-serialized composite.
    Any = 0x11,
    /// Raw bytes.
    Bytes = 0x14,
}

impl ValueType {
    /// All value types, in tag order.
    pub const ALL: [ValueType; 8] = [
        ValueType::Null,
        ValueType::Int64,
        ValueType::Uint64,
        ValueType::Double,
        ValueType::Boolean,
        ValueType::String,
        ValueType::Any,
        ValueType::Bytes,
    ];

    /// Returns the wire tag.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Parses a wire tag.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x02 => Some(Self::Null),
            0x03 => Some(Self::Int64),
            0x04 => Some(Self::Uint64),
            0x05 => Some(Self::Double),
            0x06 => Some(Self::Boolean),
            0x10 => Some(Self::String),
            0x11 => Some(Self::Any),
            0x14 => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Returns true for types with an 8-byte payload.
    #[inline]
    #[must_use]
    pub const fn is_fixed_width(self) -> bool {
        matches!(self, Self::Int64 | Self::Uint64 | Self::Double)
    }

    /// Returns true for length-prefixed types.
    #[inline]
    #[must_use]
    pub const fn is_variable_length(self) -> bool {
        matches!(self, Self::String | Self::Any | Self::Bytes)
    }

    /// Returns the lowercase type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Any => "any",
            Self::Bytes => "bytes",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type-tagged payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit unsigned integer.
    Uint64(u64),
    /// 64-bit floating point.
    Double(f64),
    /// Boolean.
    Boolean(bool),
    /// UTF-8 string.
    String(String),
    /// Raw bytes.
    Bytes(Bytes),
    /// Opaque composite, kept in its own serialized form.
    Any(Bytes),
}

impl Value {
    /// Returns the type tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Int64(_) => ValueType::Int64,
            Self::Uint64(_) => ValueType::Uint64,
            Self::Double(_) => ValueType::Double,
            Self::Boolean(_) => ValueType::Boolean,
            Self::String(_) => ValueType::String,
            Self::Bytes(_) => ValueType::Bytes,
            Self::Any(_) => ValueType::Any,
        }
    }

    /// Returns true if this value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the payload of a variable-length value.
    #[must_use]
    pub fn as_payload(&self) -> Option<&[u8]> {
        match self {
            Self::String(s) => Some(s.as_bytes()),
            Self::Bytes(b) | Self::Any(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}u"),
            Self::Double(v) => write!(f, "{v:?}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "bytes[{}]", b.len()),
            Self::Any(b) => write!(f, "any[{}]", b.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

/// A value tagged with the id of its column.
#[derive(Debug, Clone, PartialEq)]
pub struct UnversionedValue {
    /// Positional index into the schema's column list.
    pub column_id: u16,
    /// The payload.
    pub value: Value,
}

impl UnversionedValue {
    /// Creates a new value for the given column.
    #[inline]
    #[must_use]
    pub fn new(column_id: u16, value: impl Into<Value>) -> Self {
        Self {
            column_id,
            value: value.into(),
        }
    }

    /// Creates a null value for the given column.
    #[inline]
    #[must_use]
    pub const fn null(column_id: u16) -> Self {
        Self {
            column_id,
            value: Value::Null,
        }
    }

    /// Returns the type tag of the payload.
    #[inline]
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value.value_type()
    }
}

impl fmt::Display for UnversionedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}={}", self.column_id, self.value)
    }
}
