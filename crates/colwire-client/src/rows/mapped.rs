//! Mapped serializers.
//!
//! These convert objects straight to rows and back through their
//! [`FieldMap`], one field at a time.

use std::fmt;
use std::sync::Arc;

use colwire_common::error::CodecResult;
use colwire_common::types::{TableSchema, UnversionedRow};
use colwire_wire::{RowDeserializer, RowSerializer};

use super::FieldMap;

/// Serializes objects through a field map.
pub struct MappedRowSerializer<T> {
    fields: Arc<FieldMap<T>>,
}

impl<T> MappedRowSerializer<T> {
    /// Creates a serializer for the given field map.
    pub fn new(fields: Arc<FieldMap<T>>) -> Self {
        Self { fields }
    }
}

impl<T> RowSerializer<T> for MappedRowSerializer<T> {
    fn schema(&self) -> &Arc<TableSchema> {
        self.fields.table_schema()
    }

    fn serialize(&self, object: &T) -> CodecResult<UnversionedRow> {
        self.fields.to_row(object)
    }
}

impl<T> Clone for MappedRowSerializer<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.fields))
    }
}

impl<T> fmt::Debug for MappedRowSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedRowSerializer")
            .field("fields", &self.fields)
            .finish()
    }
}

/// Deserializes objects through a field map.
///
/// Each object starts as `T::default()`; columns missing from a sparse row
/// keep their default.
pub struct MappedRowDeserializer<T> {
    fields: Arc<FieldMap<T>>,
}

impl<T> MappedRowDeserializer<T> {
    /// Creates a deserializer for the given field map.
    pub fn new(fields: Arc<FieldMap<T>>) -> Self {
        Self { fields }
    }
}

impl<T: Default> RowDeserializer for MappedRowDeserializer<T> {
    type Item = T;

    fn schema(&self) -> &Arc<TableSchema> {
        self.fields.table_schema()
    }

    fn deserialize(&self, row: UnversionedRow) -> CodecResult<T> {
        self.fields.from_row(row)
    }
}

impl<T> Clone for MappedRowDeserializer<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.fields))
    }
}

impl<T> fmt::Debug for MappedRowDeserializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedRowDeserializer")
            .field("fields", &self.fields)
            .finish()
    }
}
