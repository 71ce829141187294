//! # colwire-wire
//!
//! Binary wire format for unversioned rows.
//!
//! This crate converts sequences of rows into an ordered list of byte chunks
//! and back. It implements:
//! - A writer that packs rowsets into fixed-size chunks
//! - A reader that decodes rowsets from a chunk sequence without first
//!   concatenating it
//! - The serializer and deserializer traits that bridge typed objects and
//!   generic rows, with the identity variant for unversioned rows
//!
//! # Architecture
//!
//! Chunk boundaries are a writer-side packing decision and carry no meaning:
//! a row may start in one chunk and end in the next. The reader presents the
//! chunks as a single logical stream through [`ChunkCursor`].
//!
//! ## Row Format
//!
//! All integers are little-endian. A rowset is a row count followed by the
//! rows; each row is a value count followed by the values:
//!
//! ```text
//! +----------------+----------------+-----------------+------------------+
//! | RowCount (u64) | ValueCount(u32)| Value ...       | ValueCount ...   |
//! +----------------+----------------+-----------------+------------------+
//!
//! +---------------+----------+-----------+----------------------------------+
//! | ColumnId(u16) | Tag (u8) | Flags(u8) | Payload                          |
//! +---------------+----------+-----------+----------------------------------+
//! ```
//!
//! Int64, uint64 and double payloads are 8 bytes, booleans 1 byte, nulls
//! empty, and string, bytes and any payloads a `u32` length followed by the
//! data.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Chunk sequence cursor.
pub mod chunk;

/// Value and row encoding.
pub mod format;

/// Reader for decoding chunk sequences.
pub mod reader;

/// Serializer and deserializer traits.
pub mod serializer;

/// Writer for encoding chunk sequences.
pub mod writer;

// Re-exports for convenience
pub use chunk::ChunkCursor;
pub use reader::WireReader;
pub use serializer::{
    RowDeserializer, RowSerializer, UnversionedRowDeserializer, UnversionedRowSerializer,
};
pub use writer::{WireWriter, WriterStats};
