//! # colwire-client
//!
//! Object mapping for the colwire wire format.
//!
//! This crate turns application objects into wire chunks and back. It
//! includes:
//!
//! - **Column Values**: Conversions between Rust field types and typed values
//! - **Field Maps**: Explicit per-type declarations of columns and accessors
//! - **Mapped Serializers**: Direct object to row conversion
//! - **Legacy Serializers**: Conversion through the generic tree
//! - **Table Codec**: One facade bundling a field map with every variant
//!
//! ## Quick Start
//!
//! ```rust
//! use colwire_client::{FieldMap, TableCodec};
//! use colwire_common::types::ValueType;
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! let fields = FieldMap::<User>::builder()
//!     .key("id", ValueType::Int64, |u| &u.id, |u| &mut u.id)
//!     .column("name", ValueType::String, |u| &u.name, |u| &mut u.name)
//!     .build()
//!     .unwrap();
//! let codec = TableCodec::new(fields).unwrap();
//!
//! let users = vec![User { id: 1, name: "alice".to_string() }];
//! let chunks = codec.serialize_mapped(&users).unwrap();
//! assert_eq!(codec.deserialize_mapped(chunks).unwrap(), users);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Typed table codec facade.
pub mod codec;

/// Object to row conversion.
pub mod rows;

// Re-exports for convenience
pub use codec::TableCodec;
pub use rows::{
    AnyValue, ColumnValue, FieldMap, FieldMapBuilder, LegacyRowDeserializer, LegacyRowSerializer,
    MappedRowDeserializer, MappedRowSerializer,
};
