//! Chunk-boundary independence tests.
//!
//! Chunk boundaries are a packing detail: re-splitting an encoded stream
//! anywhere must not change what decodes from it.

use rand::rngs::StdRng;
use rand::SeedableRng;

use colwire_client::TableCodec;
use colwire_common::types::UnversionedRowset;
use colwire_common::WireConfig;
use colwire_test::fixtures::order_fields;
use colwire_test::workload::{
    concat, random_orders, random_rows, random_schema, random_split, split_at,
};
use colwire_wire::{WireReader, WireWriter};

fn encode(rowset: &UnversionedRowset, chunk_size: usize) -> Vec<bytes::Bytes> {
    let config = WireConfig::default().with_chunk_size(chunk_size);
    let mut writer = WireWriter::with_config(config).unwrap();
    writer.write_unversioned_rowset(rowset).unwrap();
    writer.finish()
}

#[test]
fn test_split_at_every_point() {
    let mut rng = StdRng::seed_from_u64(10);
    let schema = random_schema(&mut rng, 6).into_shared();
    let rowset = UnversionedRowset::new(schema.clone(), random_rows(&mut rng, &schema, 8));
    let data = concat(&encode(&rowset, 4096));

    for offset in 0..=data.len() {
        let chunks = split_at(&data, &[offset]);
        let decoded = WireReader::new(chunks).read_rowset(schema.clone()).unwrap();
        assert_eq!(decoded, rowset, "split at {}", offset);
    }
}

#[test]
fn test_split_into_single_bytes() {
    let mut rng = StdRng::seed_from_u64(11);
    let schema = random_schema(&mut rng, 8).into_shared();
    let rowset = UnversionedRowset::new(schema.clone(), random_rows(&mut rng, &schema, 10));
    let data = concat(&encode(&rowset, 4096));

    let offsets: Vec<usize> = (1..data.len()).collect();
    let decoded = WireReader::new(split_at(&data, &offsets))
        .read_rowset(schema)
        .unwrap();
    assert_eq!(decoded, rowset);
}

#[test]
fn test_random_splits_with_empty_chunks() {
    let mut rng = StdRng::seed_from_u64(12);

    for _ in 0..100 {
        let schema = random_schema(&mut rng, 10).into_shared();
        let rowset = UnversionedRowset::new(schema.clone(), random_rows(&mut rng, &schema, 20));
        let data = concat(&encode(&rowset, 4096));

        let chunks = random_split(&mut rng, &data, 16);
        let decoded = WireReader::new(chunks).read_rowset(schema).unwrap();
        assert_eq!(decoded, rowset);
    }
}

#[test]
fn test_writer_chunk_size_does_not_change_stream() {
    let mut rng = StdRng::seed_from_u64(13);
    let schema = random_schema(&mut rng, 8).into_shared();
    let rowset = UnversionedRowset::new(schema.clone(), random_rows(&mut rng, &schema, 25));
    let reference = concat(&encode(&rowset, 1 << 20));

    for chunk_size in 1..64 {
        let chunks = encode(&rowset, chunk_size);
        assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= chunk_size));
        assert_eq!(concat(&chunks), reference, "chunk size {}", chunk_size);

        let decoded = WireReader::new(chunks).read_rowset(schema.clone()).unwrap();
        assert_eq!(decoded, rowset);
    }
}

#[test]
fn test_objects_across_chunk_boundaries() {
    let mut rng = StdRng::seed_from_u64(14);
    let orders = random_orders(&mut rng, 40);
    let codec =
        TableCodec::with_config(order_fields(), WireConfig::default().with_chunk_size(5)).unwrap();

    let chunks = codec.serialize_mapped(&orders).unwrap();
    assert!(chunks.len() > 1);
    assert_eq!(codec.deserialize_mapped(chunks).unwrap(), orders);
}
