//! Error handling for colwire.
//!
//! This module provides a unified error type and result alias used
//! across all colwire components.

mod codec;

pub use codec::{CodecError, ErrorCategory};

/// Result type alias for colwire operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
