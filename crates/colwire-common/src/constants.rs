//! Format constants for colwire.
//!
//! This module defines the limits and defaults of the wire format. Values
//! that change the byte layout are fixed; the rest can be overridden through
//! [`WireConfig`](crate::config::WireConfig).

// =============================================================================
// Wire Layout
// =============================================================================

/// Size of the rowset header (row count, `u64`).
pub const ROWSET_HEADER_SIZE: usize = 8;

/// Size of the row header (value count, `u32`).
pub const ROW_HEADER_SIZE: usize = 4;

/// Size of a value header.
///
/// The header contains: column_id (2), type_tag (1), flags (1) = 4 bytes.
pub const VALUE_HEADER_SIZE: usize = 4;

/// Size of the length prefix of string, bytes and any payloads.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Payload size of int64, uint64 and double values.
pub const FIXED_PAYLOAD_SIZE: usize = 8;

/// Payload size of boolean values.
pub const BOOLEAN_PAYLOAD_SIZE: usize = 1;

// =============================================================================
// Schema Limits
// =============================================================================

/// Maximum number of columns in a table schema.
///
/// Column ids are encoded as `u16`, so every id must fit that range.
pub const MAX_COLUMN_COUNT: usize = u16::MAX as usize + 1;

// =============================================================================
// Codec Defaults
// =============================================================================

/// Default chunk size in bytes (4 KB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Minimum chunk size in bytes.
///
/// Smaller chunks are accepted by the format but only useful in tests.
pub const MIN_CHUNK_SIZE: usize = 1;

/// Maximum chunk size in bytes (64 MB).
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Default maximum length of a string, bytes or any payload (16 MB).
pub const DEFAULT_MAX_STRING_LENGTH: usize = 16 * 1024 * 1024;

/// Default maximum number of values in a single row.
///
/// Matches the widest schema, so any row valid for its schema can be written.
pub const DEFAULT_MAX_VALUES_PER_ROW: usize = MAX_COLUMN_COUNT;
