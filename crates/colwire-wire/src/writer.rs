//! Wire writer for encoding rowsets into chunks.
//!
//! This module provides the writer component that handles:
//! - Converting objects into rows through a [`RowSerializer`]
//! - Key-only projection of selected rows
//! - Packing the encoded stream into fixed-size chunks

use bytes::{Bytes, BytesMut};

use colwire_common::error::CodecResult;
use colwire_common::types::{TableSchema, UnversionedRow, UnversionedRowset};
use colwire_common::WireConfig;

use crate::format;
use crate::serializer::{RowSerializer, UnversionedRowSerializer};

/// Wire writer statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Total bytes appended to the chunk stream.
    pub bytes_written: u64,
    /// Total rows written.
    pub rows_written: u64,
    /// Total rowsets written.
    pub rowsets_written: u64,
    /// Number of chunks sealed.
    pub chunks_sealed: u64,
}

/// Encodes rows into an ordered sequence of byte chunks.
///
/// Each write call is staged in full before it reaches the chunk stream, so a
/// failed call leaves the writer exactly as it was.
///
/// # Example
///
/// ```rust
/// use colwire_common::types::{TableSchema, UnversionedRow, UnversionedRowset, UnversionedValue, ValueType};
/// use colwire_wire::{WireReader, WireWriter};
///
/// let schema = TableSchema::builder()
///     .key_column("id", ValueType::Int64)
///     .build()
///     .unwrap()
///     .into_shared();
/// let rows = vec![UnversionedRow::from(vec![UnversionedValue::new(0, 1i64)])];
///
/// let mut writer = WireWriter::new();
/// writer
///     .write_unversioned_rowset(&UnversionedRowset::new(schema.clone(), rows.clone()))
///     .unwrap();
/// let chunks = writer.finish();
///
/// let rowset = WireReader::new(chunks).read_rowset(schema).unwrap();
/// assert_eq!(rowset.rows(), &rows[..]);
/// ```
#[derive(Debug, Clone)]
pub struct WireWriter {
    /// Configuration.
    config: WireConfig,
    /// Sealed chunks, in stream order.
    chunks: Vec<Bytes>,
    /// The chunk being filled. Grows on demand up to the chunk size.
    current: BytesMut,
    /// Staging area for the call in progress.
    scratch: BytesMut,
    /// Writer statistics.
    stats: WriterStats,
}

impl WireWriter {
    /// Creates a writer with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(WireConfig::default())
    }

    /// Creates a writer with the given configuration.
    pub fn with_config(config: WireConfig) -> CodecResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: WireConfig) -> Self {
        Self {
            current: BytesMut::new(),
            config,
            chunks: Vec::new(),
            scratch: BytesMut::new(),
            stats: WriterStats::default(),
        }
    }

    /// Writes a rowset of objects.
    pub fn write_rowset<T, S>(&mut self, rows: &[T], serializer: &S) -> CodecResult<()>
    where
        S: RowSerializer<T> + ?Sized,
    {
        self.write_rowset_with(rows, serializer, |_| false)
    }

    /// Writes a rowset of objects, writing only key columns for rows where
    /// `key_only(index)` returns true.
    ///
    /// Non-key values of such rows are omitted, not written as nulls.
    pub fn write_rowset_with<T, S, F>(
        &mut self,
        rows: &[T],
        serializer: &S,
        key_only: F,
    ) -> CodecResult<()>
    where
        S: RowSerializer<T> + ?Sized,
        F: Fn(usize) -> bool,
    {
        let schema = serializer.schema();
        self.scratch.clear();
        format::encode_row_count(&mut self.scratch, rows.len());

        for (index, object) in rows.iter().enumerate() {
            let row = serializer.serialize(object)?;
            if key_only(index) {
                let key = row.key_projection(schema.key_column_count());
                self.stage_row(&key, schema, true)?;
            } else {
                self.stage_row(&row, schema, false)?;
            }
        }

        self.commit(rows.len() as u64);
        self.stats.rowsets_written += 1;
        Ok(())
    }

    /// Writes an unversioned rowset with its own schema.
    pub fn write_unversioned_rowset(&mut self, rowset: &UnversionedRowset) -> CodecResult<()> {
        let serializer = UnversionedRowSerializer::new(rowset.schema().clone());
        self.write_rowset(rowset.rows(), &serializer)
    }

    /// Writes a single row without a rowset header.
    pub fn write_unversioned_row(
        &mut self,
        row: &UnversionedRow,
        schema: &TableSchema,
    ) -> CodecResult<()> {
        self.scratch.clear();
        self.stage_row(row, schema, false)?;
        self.commit(1);
        Ok(())
    }

    /// Validates and encodes one row into the staging area.
    fn stage_row(
        &mut self,
        row: &UnversionedRow,
        schema: &TableSchema,
        key_only: bool,
    ) -> CodecResult<()> {
        row.validate(schema, key_only)?;
        format::encode_row(&mut self.scratch, row, &self.config)
    }

    /// Moves the staging area into the chunk stream.
    fn commit(&mut self, rows: u64) {
        let staged = self.scratch.split();
        self.stats.bytes_written += staged.len() as u64;
        self.stats.rows_written += rows;

        let mut staged = staged.freeze();
        while !staged.is_empty() {
            let room = self.config.chunk_size - self.current.len();
            let take = room.min(staged.len());
            self.current.extend_from_slice(&staged.split_to(take));
            if self.current.len() == self.config.chunk_size {
                self.seal();
            }
        }
    }

    /// Seals the current chunk.
    fn seal(&mut self) {
        let chunk = self.current.split().freeze();
        tracing::trace!(
            "Sealed chunk {} ({} bytes)",
            self.chunks.len(),
            chunk.len()
        );
        self.chunks.push(chunk);
        self.stats.chunks_sealed += 1;
    }

    /// Returns the number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.stats.bytes_written
    }

    /// Returns the number of rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.stats.rows_written
    }

    /// Returns writer statistics.
    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WireConfig {
        &self.config
    }

    /// Finishes writing and returns the chunk sequence.
    pub fn finish(mut self) -> Vec<Bytes> {
        if !self.current.is_empty() {
            self.seal();
        }
        tracing::debug!(
            "Wire writer finished: {} chunks, {} bytes, {} rows",
            self.chunks.len(),
            self.stats.bytes_written,
            self.stats.rows_written
        );
        self.chunks
    }
}

impl Default for WireWriter {
    fn default() -> Self {
        Self::new()
    }
}
