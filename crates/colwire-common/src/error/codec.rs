//! Codec error types.
//!
//! Every failure of an encode or decode call is reported through
//! [`CodecError`]. Errors are grouped into categories so callers can tell a
//! malformed chunk stream apart from a schema disagreement and decide whether
//! to resend with a corrected schema.

use std::fmt;
use std::io;
use thiserror::Error;

use crate::types::ValueType;

/// Error categories.
///
/// The category is stable across versions and can be used for programmatic
/// error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A value could not be represented on the wire.
    Encode,
    /// The chunk stream is structurally invalid.
    Decode,
    /// A row or value disagrees with the schema in use.
    Schema,
    /// Invalid configuration.
    Config,
}

impl ErrorCategory {
    /// Returns the category name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Encode => "Encode",
            Self::Decode => "Decode",
            Self::Schema => "Schema",
            Self::Config => "Config",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The main error type for colwire.
///
/// # Example
///
/// ```rust
/// use colwire_common::error::{CodecError, ErrorCategory};
///
/// let err = CodecError::truncated(8, 3);
/// assert_eq!(err.category(), ErrorCategory::Decode);
/// ```
#[derive(Debug, Error)]
pub enum CodecError {
    // ==========================================================================
    // Encoding Errors
    // ==========================================================================
    /// A field value cannot be represented in the column's declared type.
    #[error("cannot represent value of column '{column}' as {value_type}: {reason}")]
    Unrepresentable {
        /// Column name.
        column: String,
        /// Declared column type.
        value_type: ValueType,
        /// Why the conversion failed.
        reason: String,
    },

    /// A variable-length payload exceeds the configured limit.
    #[error("value of column {column_id} is {length} bytes, maximum is {max}")]
    ValueTooLong {
        /// Column id of the offending value.
        column_id: u16,
        /// Payload length.
        length: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A row carries more values than allowed.
    #[error("row has {count} values, maximum is {max}")]
    TooManyValues {
        /// Number of values in the row.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A key row lacks one of the key columns.
    #[error("key column '{column}' is missing from key row")]
    MissingKeyColumn {
        /// Name of the missing key column.
        column: String,
    },

    // ==========================================================================
    // Decoding Errors
    // ==========================================================================
    /// The chunk stream ended before a declared length was satisfied.
    #[error("chunk stream truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required by the next read.
        needed: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },

    /// Unknown value type tag.
    #[error("unknown value type tag {tag:#04x}")]
    UnknownTypeTag {
        /// The tag read from the stream.
        tag: u8,
    },

    /// Reserved flag bits were set.
    #[error("reserved value flags set: {flags:#04x}")]
    ReservedFlags {
        /// The flags byte read from the stream.
        flags: u8,
    },

    /// A declared count or length exceeds the reader's limit.
    #[error("declared {what} {value} exceeds limit {max}")]
    LimitExceeded {
        /// What was being declared.
        what: &'static str,
        /// Declared value.
        value: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Malformed payload.
    #[error("malformed payload for column {column_id}: {reason}")]
    MalformedPayload {
        /// Column id of the value being decoded.
        column_id: u16,
        /// What was wrong.
        reason: String,
    },

    // ==========================================================================
    // Schema Errors
    // ==========================================================================
    /// Column id is outside the schema.
    #[error("column id {column_id} out of range for schema with {column_count} columns")]
    ColumnIdOutOfRange {
        /// The offending column id.
        column_id: u16,
        /// Number of columns in the schema.
        column_count: usize,
    },

    /// Value type disagrees with the column type.
    #[error("type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Column name.
        column: String,
        /// Declared column type.
        expected: ValueType,
        /// Type carried by the value.
        actual: ValueType,
    },

    /// A column id appears twice in one row.
    #[error("column id {column_id} appears more than once in a row")]
    DuplicateColumn {
        /// The repeated column id.
        column_id: u16,
    },

    /// A name does not refer to any column of the schema.
    #[error("unknown column '{name}'")]
    UnknownColumn {
        /// The unknown name.
        name: String,
    },

    /// The schema itself violates an invariant.
    #[error("invalid schema: {reason}")]
    InvalidSchema {
        /// Error message.
        reason: String,
    },

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },

    /// I/O error while loading configuration.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl CodecError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Unrepresentable { .. }
            | Self::ValueTooLong { .. }
            | Self::TooManyValues { .. }
            | Self::MissingKeyColumn { .. } => ErrorCategory::Encode,
            Self::Truncated { .. }
            | Self::UnknownTypeTag { .. }
            | Self::ReservedFlags { .. }
            | Self::LimitExceeded { .. }
            | Self::MalformedPayload { .. } => ErrorCategory::Decode,
            Self::ColumnIdOutOfRange { .. }
            | Self::TypeMismatch { .. }
            | Self::DuplicateColumn { .. }
            | Self::UnknownColumn { .. }
            | Self::InvalidSchema { .. } => ErrorCategory::Schema,
            Self::InvalidConfig { .. } | Self::Io { .. } => ErrorCategory::Config,
        }
    }

    /// Returns true if this is an encoding error.
    #[must_use]
    pub const fn is_encode(&self) -> bool {
        matches!(self.category(), ErrorCategory::Encode)
    }

    /// Returns true if this is a decoding error.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self.category(), ErrorCategory::Decode)
    }

    /// Returns true if this is a schema mismatch.
    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self.category(), ErrorCategory::Schema)
    }

    /// Creates an unrepresentable value error.
    #[must_use]
    pub fn unrepresentable(
        column: impl Into<String>,
        value_type: ValueType,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unrepresentable {
            column: column.into(),
            value_type,
            reason: reason.into(),
        }
    }

    /// Creates a truncation error.
    #[must_use]
    pub const fn truncated(needed: usize, remaining: usize) -> Self {
        Self::Truncated { needed, remaining }
    }

    /// Creates a malformed payload error.
    #[must_use]
    pub fn malformed(column_id: u16, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            column_id,
            reason: reason.into(),
        }
    }

    /// Creates an invalid schema error.
    #[must_use]
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let err = CodecError::truncated(8, 2);
        assert_eq!(err.category(), ErrorCategory::Decode);
        assert!(err.is_decode());
        assert!(!err.is_schema());

        let err = CodecError::ColumnIdOutOfRange {
            column_id: 5,
            column_count: 2,
        };
        assert!(err.is_schema());

        let err = CodecError::unrepresentable("age", ValueType::Int64, "overflow");
        assert!(err.is_encode());
        assert_eq!(err.category().name(), "Encode");
    }

    #[test]
    fn test_error_display() {
        let err = CodecError::truncated(8, 3);
        assert_eq!(
            err.to_string(),
            "chunk stream truncated: needed 8 bytes, 3 remaining"
        );

        let err = CodecError::UnknownTypeTag { tag: 0x7f };
        assert_eq!(err.to_string(), "unknown value type tag 0x7f");

        let err = CodecError::TypeMismatch {
            column: "name".to_string(),
            expected: ValueType::String,
            actual: ValueType::Int64,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch for column 'name': expected string, got int64"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CodecError = io_err.into();
        assert_eq!(err.category(), ErrorCategory::Config);
    }
}
