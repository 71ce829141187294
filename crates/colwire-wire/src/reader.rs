//! Wire reader for decoding chunk sequences.
//!
//! The reader owns the chunk sequence and consumes it front to back. Every
//! decoded row is checked against the deserializer's schema before it is
//! handed on.

use std::sync::Arc;

use bytes::{Buf, Bytes};

use colwire_common::error::CodecResult;
use colwire_common::types::{TableSchema, UnversionedRow, UnversionedRowset};
use colwire_common::WireConfig;

use crate::chunk::ChunkCursor;
use crate::format;
use crate::serializer::{RowDeserializer, UnversionedRowDeserializer};

/// Decodes rows from an ordered sequence of byte chunks.
#[derive(Debug, Clone)]
pub struct WireReader {
    /// Configuration.
    config: WireConfig,
    /// Cursor over the chunks.
    cursor: ChunkCursor,
    /// Rows decoded and accepted so far.
    rows_read: u64,
}

impl WireReader {
    /// Creates a reader with the default configuration.
    pub fn new(chunks: Vec<Bytes>) -> Self {
        Self {
            config: WireConfig::default(),
            cursor: ChunkCursor::new(chunks),
            rows_read: 0,
        }
    }

    /// Creates a reader with the given configuration.
    pub fn with_config(chunks: Vec<Bytes>, config: WireConfig) -> CodecResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cursor: ChunkCursor::new(chunks),
            rows_read: 0,
        })
    }

    /// Reads a rowset and returns the deserialized objects.
    pub fn read_unversioned_rowset<D>(&mut self, deserializer: &D) -> CodecResult<Vec<D::Item>>
    where
        D: RowDeserializer + ?Sized,
    {
        let mut items = Vec::new();
        self.read_unversioned_rowset_with(deserializer, |item| items.push(item))?;
        Ok(items)
    }

    /// Reads a rowset and passes each deserialized object to `consumer`.
    ///
    /// Returns the number of rows read. Objects already passed to the consumer
    /// stay with it if a later row fails.
    pub fn read_unversioned_rowset_with<D, F>(
        &mut self,
        deserializer: &D,
        mut consumer: F,
    ) -> CodecResult<usize>
    where
        D: RowDeserializer + ?Sized,
        F: FnMut(D::Item),
    {
        let start = self.cursor.position();
        let row_count = format::decode_row_count(&mut self.cursor)?;

        for _ in 0..row_count {
            let row = self.decode_row(deserializer.schema())?;
            let item = deserializer.deserialize(row)?;
            self.rows_read += 1;
            consumer(item);
        }

        tracing::debug!(
            "Read rowset of {} rows ({} bytes)",
            row_count,
            self.cursor.position() - start
        );
        Ok(row_count)
    }

    /// Reads a rowset as unversioned rows.
    pub fn read_rowset(&mut self, schema: Arc<TableSchema>) -> CodecResult<UnversionedRowset> {
        let deserializer = UnversionedRowDeserializer::new(schema.clone());
        let rows = self.read_unversioned_rowset(&deserializer)?;
        Ok(UnversionedRowset::new(schema, rows))
    }

    /// Reads a single row written without a rowset header.
    pub fn read_unversioned_row(&mut self, schema: &TableSchema) -> CodecResult<UnversionedRow> {
        let row = self.decode_row(schema)?;
        self.rows_read += 1;
        Ok(row)
    }

    fn decode_row(&mut self, schema: &TableSchema) -> CodecResult<UnversionedRow> {
        let row = format::decode_row(&mut self.cursor, &self.config)?;
        row.validate(schema, false)?;
        Ok(row)
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Returns true once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        !self.cursor.has_remaining()
    }

    /// Returns the number of rows read so far.
    ///
    /// Rows rejected by the deserializer are not counted.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}
