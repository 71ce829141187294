//! Random workload generators.
//!
//! All generators take a seeded [`StdRng`] so failures reproduce.

use bytes::{Bytes, BytesMut};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::Rng;

use colwire_client::AnyValue;
use colwire_common::types::{
    ColumnSchema, TableSchema, UnversionedRow, UnversionedValue, Value, ValueType,
};

use crate::fixtures::Order;

/// Generates a random alphanumeric string.
pub fn random_string(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generates random bytes.
pub fn random_bytes(rng: &mut StdRng, len: usize) -> Bytes {
    (0..len).map(|_| rng.gen::<u8>()).collect::<Vec<_>>().into()
}

/// Generates a random, non-null value of the given type.
pub fn random_value(rng: &mut StdRng, value_type: ValueType) -> Value {
    match value_type {
        ValueType::Null => Value::Null,
        ValueType::Int64 => Value::Int64(rng.gen()),
        ValueType::Uint64 => Value::Uint64(rng.gen()),
        ValueType::Double => Value::Double(rng.gen_range(-1e9..1e9)),
        ValueType::Boolean => Value::Boolean(rng.gen()),
        ValueType::String => {
            let len = rng.gen_range(0..32);
            Value::String(random_string(rng, len))
        }
        ValueType::Bytes => {
            let len = rng.gen_range(0..32);
            Value::Bytes(random_bytes(rng, len))
        }
        ValueType::Any => {
            let len = rng.gen_range(0..16);
            Value::Any(Bytes::from(format!("{{a={}}}", random_string(rng, len))))
        }
    }
}

/// Generates a random valid schema with up to `max_columns` columns.
pub fn random_schema(rng: &mut StdRng, max_columns: usize) -> TableSchema {
    const KEY_TYPES: [ValueType; 5] = [
        ValueType::Int64,
        ValueType::Uint64,
        ValueType::Double,
        ValueType::Boolean,
        ValueType::String,
    ];
    const VALUE_TYPES: [ValueType; 7] = [
        ValueType::Int64,
        ValueType::Uint64,
        ValueType::Double,
        ValueType::Boolean,
        ValueType::String,
        ValueType::Bytes,
        ValueType::Any,
    ];

    let column_count = rng.gen_range(1..=max_columns.max(1));
    let key_count = rng.gen_range(0..=column_count.min(3));
    let columns = (0..column_count)
        .map(|i| {
            let name = format!("col_{i}");
            if i < key_count {
                ColumnSchema::key(name, KEY_TYPES[rng.gen_range(0..KEY_TYPES.len())])
            } else {
                ColumnSchema::new(name, VALUE_TYPES[rng.gen_range(0..VALUE_TYPES.len())])
            }
        })
        .collect();

    TableSchema::new(columns).expect("generated schema is valid")
}

/// Generates a random row valid for `schema`.
///
/// Key columns are always present; other columns are omitted or null at
/// random.
pub fn random_row(rng: &mut StdRng, schema: &TableSchema) -> UnversionedRow {
    let mut row = UnversionedRow::with_capacity(schema.column_count());
    for (id, column) in schema.columns().iter().enumerate() {
        let id = id as u16;
        if column.is_key {
            row.push(UnversionedValue::new(id, random_value(rng, column.value_type)));
            continue;
        }
        match rng.gen_range(0..4) {
            0 => {}
            1 => row.push(UnversionedValue::null(id)),
            _ => row.push(UnversionedValue::new(id, random_value(rng, column.value_type))),
        }
    }
    row
}

/// Generates `count` random rows valid for `schema`.
pub fn random_rows(rng: &mut StdRng, schema: &TableSchema, count: usize) -> Vec<UnversionedRow> {
    (0..count).map(|_| random_row(rng, schema)).collect()
}

/// Generates a random order.
pub fn random_order(rng: &mut StdRng) -> Order {
    let region_len = rng.gen_range(2..6);
    let attachment_len = rng.gen_range(0..24);
    Order {
        id: rng.gen(),
        region: random_string(rng, region_len),
        quantity: rng.gen(),
        adjustment: rng.gen(),
        price: rng.gen_range(0.0..10_000.0),
        tax: rng.gen_range(0.0f32..0.5),
        paid: rng.gen(),
        note: if rng.gen_bool(0.5) {
            let len = rng.gen_range(0..40);
            Some(random_string(rng, len))
        } else {
            None
        },
        attachment: random_bytes(rng, attachment_len).to_vec(),
        attributes: if rng.gen_bool(0.3) {
            let len = rng.gen_range(1..8);
            Some(AnyValue::new(Bytes::from(format!(
                "{{tag={}}}",
                random_string(rng, len)
            ))))
        } else {
            None
        },
        parent: rng.gen_bool(0.2).then(|| rng.gen()),
    }
}

/// Generates `count` random orders.
pub fn random_orders(rng: &mut StdRng, count: usize) -> Vec<Order> {
    (0..count).map(|_| random_order(rng)).collect()
}

/// Concatenates chunks into one buffer.
pub fn concat(chunks: &[Bytes]) -> Bytes {
    let mut buf = BytesMut::with_capacity(chunks.iter().map(Bytes::len).sum());
    for chunk in chunks {
        buf.extend_from_slice(chunk);
    }
    buf.freeze()
}

/// Splits a stream into chunks at the given ascending offsets.
///
/// Offsets may repeat or sit at either end, producing empty chunks.
pub fn split_at(data: &Bytes, offsets: &[usize]) -> Vec<Bytes> {
    let mut chunks = Vec::with_capacity(offsets.len() + 1);
    let mut start = 0;
    for &offset in offsets {
        chunks.push(data.slice(start..offset));
        start = offset;
    }
    chunks.push(data.slice(start..));
    chunks
}

/// Splits a stream into chunks at random points.
pub fn random_split(rng: &mut StdRng, data: &Bytes, max_chunks: usize) -> Vec<Bytes> {
    let cuts = rng.gen_range(0..max_chunks.max(1));
    let mut offsets: Vec<usize> = (0..cuts).map(|_| rng.gen_range(0..=data.len())).collect();
    offsets.sort_unstable();
    split_at(data, &offsets)
}
