//! Wire codec configuration.
//!
//! These settings control chunk packing on the writer side and the
//! allocation guards applied by the reader. None of them change the byte
//! layout of a row, so a writer and a reader with different settings still
//! understand each other as long as the reader's limits are not exceeded.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_STRING_LENGTH, DEFAULT_MAX_VALUES_PER_ROW, MAX_CHUNK_SIZE,
    MAX_COLUMN_COUNT, MIN_CHUNK_SIZE,
};
use crate::error::{CodecError, CodecResult};

/// Configuration for the wire writer and reader.
///
/// # Example
///
/// ```rust
/// use colwire_common::config::WireConfig;
///
/// let config = WireConfig::default().with_chunk_size(64 * 1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Size at which the writer cuts a chunk, in bytes.
    /// Default: 4096
    pub chunk_size: usize,

    /// Maximum length of a string, bytes or any payload.
    /// Default: 16 MB
    pub max_string_length: usize,

    /// Maximum number of values in a single row.
    /// Default: 65536
    pub max_values_per_row: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            max_values_per_row: DEFAULT_MAX_VALUES_PER_ROW,
        }
    }
}

impl WireConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the maximum payload length.
    #[must_use]
    pub fn with_max_string_length(mut self, length: usize) -> Self {
        self.max_string_length = length;
        self
    }

    /// Sets the maximum number of values per row.
    #[must_use]
    pub fn with_max_values_per_row(mut self, count: usize) -> Self {
        self.max_values_per_row = count;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CodecResult<()> {
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(CodecError::invalid_config(format!(
                "chunk_size must be between {MIN_CHUNK_SIZE} and {MAX_CHUNK_SIZE} bytes"
            )));
        }

        if self.max_string_length > u32::MAX as usize {
            return Err(CodecError::invalid_config(
                "max_string_length must fit a 32-bit length prefix",
            ));
        }

        if self.max_values_per_row == 0 || self.max_values_per_row > MAX_COLUMN_COUNT {
            return Err(CodecError::invalid_config(format!(
                "max_values_per_row must be between 1 and {MAX_COLUMN_COUNT}"
            )));
        }

        Ok(())
    }

    /// Parses and validates a configuration from TOML.
    pub fn from_toml_str(content: &str) -> CodecResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CodecError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CodecResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml(&self) -> CodecResult<String> {
        toml::to_string_pretty(self).map_err(|e| CodecError::invalid_config(e.to_string()))
    }
}
