//! Object to row conversion.
//!
//! A [`FieldMap`] declares, for one object type, which columns exist and how
//! to reach the matching fields. The mapped serializers use it to convert
//! objects to rows directly; the legacy serializers go through the generic
//! tree first. Both produce the same bytes.

mod column_value;
mod field_map;
mod legacy;
mod mapped;

pub use column_value::{AnyValue, ColumnValue};
pub use field_map::{FieldMap, FieldMapBuilder};
pub use legacy::{LegacyRowDeserializer, LegacyRowSerializer};
pub use mapped::{MappedRowDeserializer, MappedRowSerializer};
