//! Legacy serializers.
//!
//! The legacy path converts each object into the generic tree first and then
//! builds the row from the tree, so callers holding trees can share the same
//! code. Its output is byte-identical to the mapped path: both read fields
//! through the same [`ColumnValue`](super::ColumnValue) conversions and tree
//! nodes carry values without loss.

use std::fmt;
use std::sync::Arc;

use colwire_common::error::CodecResult;
use colwire_common::types::{TableSchema, UnversionedRow};
use colwire_wire::{RowDeserializer, RowSerializer};

use super::FieldMap;

/// Serializes objects through the generic tree.
pub struct LegacyRowSerializer<T> {
    fields: Arc<FieldMap<T>>,
}

impl<T> LegacyRowSerializer<T> {
    /// Creates a serializer for the given field map.
    pub fn new(fields: Arc<FieldMap<T>>) -> Self {
        Self { fields }
    }
}

impl<T> RowSerializer<T> for LegacyRowSerializer<T> {
    fn schema(&self) -> &Arc<TableSchema> {
        self.fields.table_schema()
    }

    fn serialize(&self, object: &T) -> CodecResult<UnversionedRow> {
        let tree = self.fields.to_tree(object)?;
        UnversionedRow::from_tree_map(&tree, self.fields.table_schema())
    }
}

impl<T> fmt::Debug for LegacyRowSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyRowSerializer")
            .field("fields", &self.fields)
            .finish()
    }
}

/// Deserializes objects through the generic tree.
pub struct LegacyRowDeserializer<T> {
    fields: Arc<FieldMap<T>>,
}

impl<T> LegacyRowDeserializer<T> {
    /// Creates a deserializer for the given field map.
    pub fn new(fields: Arc<FieldMap<T>>) -> Self {
        Self { fields }
    }
}

impl<T: Default> RowDeserializer for LegacyRowDeserializer<T> {
    type Item = T;

    fn schema(&self) -> &Arc<TableSchema> {
        self.fields.table_schema()
    }

    fn deserialize(&self, row: UnversionedRow) -> CodecResult<T> {
        let tree = row.to_tree_map(self.fields.table_schema())?;
        self.fields.from_tree(tree)
    }
}

impl<T> fmt::Debug for LegacyRowDeserializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyRowDeserializer")
            .field("fields", &self.fields)
            .finish()
    }
}
