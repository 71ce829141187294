//! # colwire-common
//!
//! Common types, errors, and configuration for colwire.
//!
//! This crate provides the foundational pieces shared by the wire codec and
//! the object mapping layer. It includes:
//!
//! - **Types**: The value model (`ValueType`, `Value`, `UnversionedValue`),
//!   table schemas, unversioned rows and rowsets, and the generic tree used by
//!   the legacy conversion path
//! - **Errors**: Unified error handling with `CodecError`
//! - **Config**: Wire codec configuration
//! - **Constants**: Format limits and defaults
//!
//! ## Example
//!
//! ```rust
//! use colwire_common::types::{TableSchema, UnversionedRow, UnversionedValue, Value, ValueType};
//! use colwire_common::error::CodecResult;
//!
//! fn example() -> CodecResult<()> {
//!     let schema = TableSchema::builder()
//!         .key_column("id", ValueType::Int64)
//!         .column("name", ValueType::String)
//!         .build()?;
//!
//!     let mut row = UnversionedRow::new();
//!     row.push(UnversionedValue::new(0, Value::Int64(7)));
//!     row.push(UnversionedValue::new(1, Value::from("alpha")));
//!     row.validate(&schema, false)?;
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at the crate root
pub use config::WireConfig;
pub use error::{CodecError, CodecResult, ErrorCategory};
pub use types::{
    ColumnSchema, TableSchema, TreeNode, UnversionedRow, UnversionedRowset, UnversionedValue,
    Value, ValueType,
};
