//! Type definitions for colwire.
//!
//! This module contains the value model, table schemas, rows and the
//! generic tree used across the codec.

mod row;
mod schema;
mod tree;
mod value;

pub use row::{UnversionedRow, UnversionedRowset};
pub use schema::{ColumnSchema, TableSchema, TableSchemaBuilder};
pub use tree::TreeNode;
pub use value::{UnversionedValue, Value, ValueType};
