//! Benchmark utilities and helpers.

use std::sync::Arc;

use bytes::Bytes;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use colwire_client::{AnyValue, FieldMap};
use colwire_common::types::{TableSchema, UnversionedRow, UnversionedValue, ValueType};

/// Generates random string data for benchmarks.
pub fn random_string(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// An event record used by the mapping benchmarks.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Event {
    /// Event id.
    pub id: i64,
    /// Source host.
    pub host: String,
    /// Sequence number within the host.
    pub seq: u32,
    /// Measured latency.
    pub latency: f64,
    /// Whether the event was retried.
    pub retried: bool,
    /// Opaque attributes.
    pub attrs: Option<AnyValue>,
}

/// Returns the field map for [`Event`].
pub fn event_fields() -> FieldMap<Event> {
    FieldMap::<Event>::builder()
        .key("id", ValueType::Int64, |e| &e.id, |e| &mut e.id)
        .column("host", ValueType::String, |e| &e.host, |e| &mut e.host)
        .column("seq", ValueType::Uint64, |e| &e.seq, |e| &mut e.seq)
        .column("latency", ValueType::Double, |e| &e.latency, |e| &mut e.latency)
        .column("retried", ValueType::Boolean, |e| &e.retried, |e| &mut e.retried)
        .column("attrs", ValueType::Any, |e| &e.attrs, |e| &mut e.attrs)
        .build()
        .expect("event field map is valid")
}

/// Generates random events.
pub fn generate_events(count: usize) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count as i64)
        .map(|i| {
            let host_len = rng.gen_range(4..16);
            Event {
                id: i,
                host: random_string(&mut rng, host_len),
                seq: rng.gen(),
                latency: rng.gen_range(0.0..1000.0),
                retried: rng.gen_bool(0.1),
                attrs: rng
                    .gen_bool(0.5)
                    .then(|| AnyValue::new(Bytes::from(random_string(&mut rng, 24)))),
            }
        })
        .collect()
}

/// Returns a wide schema of string columns behind one int64 key.
pub fn wide_schema(columns: usize) -> Arc<TableSchema> {
    let mut builder = TableSchema::builder().key_column("key", ValueType::Int64);
    for i in 1..columns {
        builder = builder.column(format!("c{:03}", i), ValueType::String);
    }
    builder.build().expect("wide schema is valid").into_shared()
}

/// Generates rows for [`wide_schema`], dropping roughly `sparsity` of the
/// non-key values.
pub fn generate_rows(
    schema: &TableSchema,
    count: usize,
    value_size: usize,
    sparsity: f64,
) -> Vec<UnversionedRow> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let mut row = UnversionedRow::with_capacity(schema.column_count());
            row.push(UnversionedValue::new(0, i as i64));
            for id in 1..schema.column_count() as u16 {
                if !rng.gen_bool(sparsity) {
                    row.push(UnversionedValue::new(id, random_string(&mut rng, value_size)));
                }
            }
            row
        })
        .collect()
}
