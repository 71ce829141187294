//! Conversions between field types and typed values.

use bytes::Bytes;

use colwire_common::error::{CodecError, CodecResult};
use colwire_common::types::{Value, ValueType};

/// A field type that can be stored in a column.
///
/// Conversions are checked: a field value that does not fit the column type,
/// or a stored value that does not fit the field, is an encoding error naming
/// the column.
pub trait ColumnValue: Sized {
    /// Converts the field into a value of the column type.
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value>;

    /// Converts a stored value back into the field type.
    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self>;
}

/// Payload of an `any` column, kept in its serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AnyValue(pub Bytes);

impl AnyValue {
    /// Wraps an already-serialized payload.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    /// Returns the payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

fn incompatible(column: &str, value_type: ValueType, what: &str) -> CodecError {
    CodecError::unrepresentable(column, value_type, format!("incompatible with {what}"))
}

fn unexpected(column: &str, value_type: ValueType, value: &Value) -> CodecError {
    CodecError::unrepresentable(
        column,
        value_type,
        format!("stored {} value does not fit field", value.value_type()),
    )
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ColumnValue for $ty {
                fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
                    let out_of_range = || {
                        CodecError::unrepresentable(column, value_type, format!("{} out of range", self))
                    };
                    match value_type {
                        ValueType::Int64 => i64::try_from(*self).map(Value::Int64).map_err(|_| out_of_range()),
                        ValueType::Uint64 => u64::try_from(*self).map(Value::Uint64).map_err(|_| out_of_range()),
                        _ => Err(incompatible(column, value_type, stringify!($ty))),
                    }
                }

                fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
                    let converted = match &value {
                        Value::Int64(v) => <$ty>::try_from(*v).ok(),
                        Value::Uint64(v) => <$ty>::try_from(*v).ok(),
                        _ => None,
                    };
                    converted.ok_or_else(|| unexpected(column, value_type, &value))
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl ColumnValue for f64 {
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        match value_type {
            ValueType::Double => Ok(Value::Double(*self)),
            _ => Err(incompatible(column, value_type, "f64")),
        }
    }

    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
        match value {
            Value::Double(v) => Ok(v),
            other => Err(unexpected(column, value_type, &other)),
        }
    }
}

/// Reads fail unless the stored double converts to `f32` without loss.
impl ColumnValue for f32 {
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        match value_type {
            ValueType::Double => Ok(Value::Double(f64::from(*self))),
            _ => Err(incompatible(column, value_type, "f32")),
        }
    }

    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
        match value {
            Value::Double(v) => {
                let narrowed = v as f32;
                if !v.is_nan() && f64::from(narrowed) != v {
                    return Err(CodecError::unrepresentable(
                        column,
                        value_type,
                        format!("{v} is not exactly representable as f32"),
                    ));
                }
                Ok(narrowed)
            }
            other => Err(unexpected(column, value_type, &other)),
        }
    }
}

impl ColumnValue for bool {
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        match value_type {
            ValueType::Boolean => Ok(Value::Boolean(*self)),
            _ => Err(incompatible(column, value_type, "bool")),
        }
    }

    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
        match value {
            Value::Boolean(v) => Ok(v),
            other => Err(unexpected(column, value_type, &other)),
        }
    }
}

impl ColumnValue for String {
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        match value_type {
            ValueType::String => Ok(Value::String(self.clone())),
            ValueType::Bytes => Ok(Value::Bytes(Bytes::copy_from_slice(self.as_bytes()))),
            _ => Err(incompatible(column, value_type, "String")),
        }
    }

    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
        match value {
            Value::String(s) => Ok(s),
            Value::Bytes(b) => String::from_utf8(b.to_vec()).map_err(|_| {
                CodecError::unrepresentable(column, value_type, "bytes are not valid UTF-8")
            }),
            other => Err(unexpected(column, value_type, &other)),
        }
    }
}

impl ColumnValue for Bytes {
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        match value_type {
            ValueType::Bytes => Ok(Value::Bytes(self.clone())),
            ValueType::String => std::str::from_utf8(self)
                .map(|s| Value::String(s.to_string()))
                .map_err(|_| {
                    CodecError::unrepresentable(column, value_type, "bytes are not valid UTF-8")
                }),
            _ => Err(incompatible(column, value_type, "Bytes")),
        }
    }

    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
        match value {
            Value::Bytes(b) => Ok(b),
            Value::String(s) => Ok(Bytes::from(s)),
            other => Err(unexpected(column, value_type, &other)),
        }
    }
}

impl ColumnValue for Vec<u8> {
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        Bytes::copy_from_slice(self).to_value(column, value_type)
    }

    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
        Bytes::from_value(value, column, value_type).map(|b| b.to_vec())
    }
}

impl ColumnValue for AnyValue {
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        match value_type {
            ValueType::Any => Ok(Value::Any(self.0.clone())),
            _ => Err(incompatible(column, value_type, "AnyValue")),
        }
    }

    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
        match value {
            Value::Any(b) => Ok(Self(b)),
            other => Err(unexpected(column, value_type, &other)),
        }
    }
}

impl<V: ColumnValue> ColumnValue for Option<V> {
    fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        match self {
            Some(v) => v.to_value(column, value_type),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: Value, column: &str, value_type: ValueType) -> CodecResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => V::from_value(other, column, value_type).map(Some),
        }
    }
}
