//! Sample mapped types used across the integration tests.

use std::sync::Arc;

use colwire_client::{AnyValue, FieldMap};
use colwire_common::types::{TableSchema, ValueType};

/// An order line exercising every field type the mapper supports.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Order {
    /// Order id.
    pub id: i64,
    /// Region code; second key column.
    pub region: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Discount in percent points, may be negative.
    pub adjustment: i8,
    /// Unit price.
    pub price: f64,
    /// Tax rate.
    pub tax: f32,
    /// Whether the order is paid.
    pub paid: bool,
    /// Free-form note.
    pub note: Option<String>,
    /// Raw attachment.
    pub attachment: Vec<u8>,
    /// Pre-serialized attributes.
    pub attributes: Option<AnyValue>,
    /// Optional reference to a parent order.
    pub parent: Option<u64>,
}

/// Returns the field map for [`Order`].
pub fn order_fields() -> FieldMap<Order> {
    FieldMap::<Order>::builder()
        .key("id", ValueType::Int64, |o| &o.id, |o| &mut o.id)
        .key("region", ValueType::String, |o| &o.region, |o| &mut o.region)
        .column("quantity", ValueType::Uint64, |o| &o.quantity, |o| &mut o.quantity)
        .column("adjustment", ValueType::Int64, |o| &o.adjustment, |o| &mut o.adjustment)
        .column("price", ValueType::Double, |o| &o.price, |o| &mut o.price)
        .column("tax", ValueType::Double, |o| &o.tax, |o| &mut o.tax)
        .column("paid", ValueType::Boolean, |o| &o.paid, |o| &mut o.paid)
        .column("note", ValueType::String, |o| &o.note, |o| &mut o.note)
        .column("attachment", ValueType::Bytes, |o| &o.attachment, |o| &mut o.attachment)
        .column("attributes", ValueType::Any, |o| &o.attributes, |o| &mut o.attributes)
        .column("parent", ValueType::Uint64, |o| &o.parent, |o| &mut o.parent)
        .build()
        .expect("order field map is valid")
}

/// A two-column record matching the `{id: int64 key, name: string}` table.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Named {
    /// Row id.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Returns the field map for [`Named`].
pub fn named_fields() -> FieldMap<Named> {
    FieldMap::<Named>::builder()
        .key("id", ValueType::Int64, |n| &n.id, |n| &mut n.id)
        .column("name", ValueType::String, |n| &n.name, |n| &mut n.name)
        .build()
        .expect("named field map is valid")
}

/// Returns the `{id: int64 key, name: string}` schema.
pub fn named_schema() -> Arc<TableSchema> {
    TableSchema::builder()
        .key_column("id", ValueType::Int64)
        .column("name", ValueType::String)
        .build()
        .expect("named schema is valid")
        .into_shared()
}
