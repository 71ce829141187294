//! Differential tests between the mapped and legacy conversion paths.
//!
//! The two paths must produce byte-identical chunks for every object,
//! including floating-point edge values and `any` payloads.

use std::sync::Arc;

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;

use colwire_client::{
    AnyValue, FieldMap, LegacyRowDeserializer, LegacyRowSerializer, MappedRowDeserializer,
    MappedRowSerializer, TableCodec,
};
use colwire_common::types::ValueType;
use colwire_common::WireConfig;
use colwire_test::fixtures::{order_fields, Order};
use colwire_test::workload::random_order;
use colwire_wire::{RowDeserializer, RowSerializer};

#[test]
fn test_random_orders_match() {
    let mut rng = StdRng::seed_from_u64(20);
    let fields = Arc::new(order_fields());
    let mapped = MappedRowSerializer::new(fields.clone());
    let legacy = LegacyRowSerializer::new(fields);

    for _ in 0..2000 {
        let order = random_order(&mut rng);
        assert_eq!(
            mapped.serialize(&order).unwrap(),
            legacy.serialize(&order).unwrap(),
            "{:?}",
            order
        );
    }
}

#[test]
fn test_random_batches_byte_identical() {
    let mut rng = StdRng::seed_from_u64(21);
    let codec =
        TableCodec::with_config(order_fields(), WireConfig::default().with_chunk_size(64)).unwrap();

    for _ in 0..50 {
        let orders: Vec<Order> = (0..20).map(|_| random_order(&mut rng)).collect();
        let mapped = codec.serialize_mapped(&orders).unwrap();
        let legacy = codec.serialize_legacy(&orders).unwrap();
        assert_eq!(mapped, legacy);
        assert_eq!(codec.deserialize_legacy(mapped).unwrap(), orders);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Edge {
    key: u64,
    value: f64,
    blob: Option<AnyValue>,
}

fn edge_fields() -> Arc<FieldMap<Edge>> {
    Arc::new(
        FieldMap::<Edge>::builder()
            .key("key", ValueType::Uint64, |e| &e.key, |e| &mut e.key)
            .column("value", ValueType::Double, |e| &e.value, |e| &mut e.value)
            .column("blob", ValueType::Any, |e| &e.blob, |e| &mut e.blob)
            .build()
            .unwrap(),
    )
}

#[test]
fn test_float_and_any_edge_values() {
    let fields = edge_fields();
    let mapped = MappedRowSerializer::new(fields.clone());
    let legacy = LegacyRowSerializer::new(fields.clone());
    let mapped_de = MappedRowDeserializer::new(fields.clone());
    let legacy_de = LegacyRowDeserializer::new(fields);

    let doubles = [
        0.0,
        -0.0,
        f64::MIN_POSITIVE,
        f64::MAX,
        f64::MIN,
        f64::EPSILON,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        1.0 / 3.0,
    ];
    let blobs = [
        None,
        Some(AnyValue::new(Bytes::new())),
        Some(AnyValue::new(Bytes::from_static(b"{a=[1;2;#]}"))),
        Some(AnyValue::new(Bytes::from_static(&[0x00, 0xff, 0x80]))),
    ];

    for (i, value) in doubles.iter().enumerate() {
        for blob in &blobs {
            let edge = Edge {
                key: u64::MAX - i as u64,
                value: *value,
                blob: blob.clone(),
            };
            let a = mapped.serialize(&edge).unwrap();
            let b = legacy.serialize(&edge).unwrap();

            let mut bytes_a = Vec::new();
            let mut bytes_b = Vec::new();
            for (row, out) in [(&a, &mut bytes_a), (&b, &mut bytes_b)] {
                let mut writer = colwire_wire::WireWriter::new();
                writer
                    .write_unversioned_row(row, RowSerializer::schema(&mapped))
                    .unwrap();
                *out = writer.finish();
            }
            assert_eq!(bytes_a, bytes_b, "value {:?}", value);

            let from_mapped = mapped_de.deserialize(a).unwrap();
            let from_legacy = legacy_de.deserialize(b).unwrap();
            assert_eq!(from_mapped.value.to_bits(), value.to_bits());
            assert_eq!(from_legacy.value.to_bits(), value.to_bits());
            assert_eq!(from_mapped.blob, *blob);
            assert_eq!(from_legacy.blob, *blob);
        }
    }
}
