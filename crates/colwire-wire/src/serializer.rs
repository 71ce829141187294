//! Row serializer seam.
//!
//! A serializer turns a caller object into an [`UnversionedRow`] and a
//! deserializer does the opposite. The writer and reader only ever talk to
//! these traits, so object mapping lives outside the wire crate.

use std::sync::Arc;

use colwire_common::error::CodecResult;
use colwire_common::types::{TableSchema, UnversionedRow};

/// Converts objects of type `T` into rows.
pub trait RowSerializer<T: ?Sized> {
    /// Returns the schema that produced rows follow.
    fn schema(&self) -> &Arc<TableSchema>;

    /// Converts one object into a row.
    fn serialize(&self, object: &T) -> CodecResult<UnversionedRow>;
}

/// Converts rows back into objects.
pub trait RowDeserializer {
    /// The object type produced.
    type Item;

    /// Returns the schema incoming rows are checked against.
    fn schema(&self) -> &Arc<TableSchema>;

    /// Converts one decoded row into an object.
    fn deserialize(&self, row: UnversionedRow) -> CodecResult<Self::Item>;
}

impl<T: ?Sized, S: RowSerializer<T> + ?Sized> RowSerializer<T> for &S {
    fn schema(&self) -> &Arc<TableSchema> {
        (**self).schema()
    }

    fn serialize(&self, object: &T) -> CodecResult<UnversionedRow> {
        (**self).serialize(object)
    }
}

impl<D: RowDeserializer + ?Sized> RowDeserializer for &D {
    type Item = D::Item;

    fn schema(&self) -> &Arc<TableSchema> {
        (**self).schema()
    }

    fn deserialize(&self, row: UnversionedRow) -> CodecResult<Self::Item> {
        (**self).deserialize(row)
    }
}

/// Serializer for rows that are already unversioned.
#[derive(Debug, Clone)]
pub struct UnversionedRowSerializer {
    schema: Arc<TableSchema>,
}

impl UnversionedRowSerializer {
    /// Creates a serializer bound to a schema.
    pub fn new(schema: Arc<TableSchema>) -> Self {
        Self { schema }
    }
}

impl RowSerializer<UnversionedRow> for UnversionedRowSerializer {
    fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    fn serialize(&self, row: &UnversionedRow) -> CodecResult<UnversionedRow> {
        Ok(row.clone())
    }
}

/// Deserializer that hands rows through unchanged.
#[derive(Debug, Clone)]
pub struct UnversionedRowDeserializer {
    schema: Arc<TableSchema>,
}

impl UnversionedRowDeserializer {
    /// Creates a deserializer bound to a schema.
    pub fn new(schema: Arc<TableSchema>) -> Self {
        Self { schema }
    }
}

impl RowDeserializer for UnversionedRowDeserializer {
    type Item = UnversionedRow;

    fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    fn deserialize(&self, row: UnversionedRow) -> CodecResult<UnversionedRow> {
        Ok(row)
    }
}
