//! Generic tree representation.
//!
//! Older callers build a tree (a map from column name to node) before
//! turning it into a row, so they can rewrite the tree in between. Strings
//! are byte strings here, which is why both `string` and `bytes` columns map
//! onto [`TreeNode::String`]. The payload of an `any` column is kept as a
//! pre-serialized [`TreeNode::Raw`] fragment.

use std::collections::BTreeMap;

use bytes::Bytes;

use super::{Value, ValueType};
use crate::error::{CodecError, CodecResult};

/// A node of the generic tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// The empty node, used for null.
    Entity,
    /// Boolean scalar.
    Boolean(bool),
    /// Signed integer scalar.
    Int64(i64),
    /// Unsigned integer scalar.
    Uint64(u64),
    /// Floating point scalar.
    Double(f64),
    /// Byte string scalar.
    String(Bytes),
    /// Pre-serialized subtree.
    Raw(Bytes),
    /// Ordered list.
    List(Vec<TreeNode>),
    /// Map keyed by name.
    Map(BTreeMap<String, TreeNode>),
}

impl TreeNode {
    /// Creates an empty map node.
    #[must_use]
    pub fn map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// Returns true for [`TreeNode::Entity`].
    #[must_use]
    pub fn is_entity(&self) -> bool {
        matches!(self, Self::Entity)
    }

    /// Returns the entries of a map node.
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, TreeNode>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the entries of a map node mutably.
    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, TreeNode>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the node kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Boolean(_) => "boolean",
            Self::Int64(_) => "int64",
            Self::Uint64(_) => "uint64",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Raw(_) => "raw",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Converts this node into a value of the given column type.
    ///
    /// [`TreeNode::Entity`] becomes null for any type. Integer nodes convert
    /// between signed and unsigned columns when the value fits.
    pub fn to_value(&self, column: &str, value_type: ValueType) -> CodecResult<Value> {
        let value = match (self, value_type) {
            (Self::Entity, _) => Value::Null,
            (Self::Int64(v), ValueType::Int64) => Value::Int64(*v),
            (Self::Int64(v), ValueType::Uint64) => {
                Value::Uint64(u64::try_from(*v).map_err(|_| {
                    CodecError::unrepresentable(column, value_type, format!("{v} is negative"))
                })?)
            }
            (Self::Uint64(v), ValueType::Uint64) => Value::Uint64(*v),
            (Self::Uint64(v), ValueType::Int64) => {
                Value::Int64(i64::try_from(*v).map_err(|_| {
                    CodecError::unrepresentable(column, value_type, format!("{v} overflows int64"))
                })?)
            }
            (Self::Double(v), ValueType::Double) => Value::Double(*v),
            (Self::Boolean(v), ValueType::Boolean) => Value::Boolean(*v),
            (Self::String(b), ValueType::String) => {
                let s = std::str::from_utf8(b).map_err(|_| {
                    CodecError::unrepresentable(column, value_type, "string is not valid UTF-8")
                })?;
                Value::String(s.to_string())
            }
            (Self::String(b), ValueType::Bytes) => Value::Bytes(b.clone()),
            (Self::Raw(b), ValueType::Any) => Value::Any(b.clone()),
            _ => {
                return Err(CodecError::unrepresentable(
                    column,
                    value_type,
                    format!("{} node", self.kind()),
                ))
            }
        };
        Ok(value)
    }
}

impl From<&Value> for TreeNode {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Entity,
            Value::Int64(v) => Self::Int64(*v),
            Value::Uint64(v) => Self::Uint64(*v),
            Value::Double(v) => Self::Double(*v),
            Value::Boolean(v) => Self::Boolean(*v),
            Value::String(s) => Self::String(Bytes::copy_from_slice(s.as_bytes())),
            Value::Bytes(b) => Self::String(b.clone()),
            Value::Any(b) => Self::Raw(b.clone()),
        }
    }
}

impl From<&str> for TreeNode {
    fn from(v: &str) -> Self {
        Self::String(Bytes::copy_from_slice(v.as_bytes()))
    }
}

impl From<i64> for TreeNode {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<BTreeMap<String, TreeNode>> for TreeNode {
    fn from(v: BTreeMap<String, TreeNode>) -> Self {
        Self::Map(v)
    }
}
