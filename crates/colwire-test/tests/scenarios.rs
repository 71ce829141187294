//! Concrete end-to-end scenarios.

use bytes::Bytes;

use colwire_client::TableCodec;
use colwire_common::types::{UnversionedRow, UnversionedRowset, UnversionedValue, Value};
use colwire_test::fixtures::{named_fields, named_schema, Named};
use colwire_wire::{UnversionedRowSerializer, WireReader, WireWriter};

fn encode(rowset: &UnversionedRowset) -> Vec<Bytes> {
    let mut writer = WireWriter::new();
    writer.write_unversioned_rowset(rowset).unwrap();
    writer.finish()
}

#[test]
fn test_id_name_row_reencodes_identically() {
    let schema = named_schema();
    let row = UnversionedRow::from(vec![
        UnversionedValue::new(0, 7i64),
        UnversionedValue::new(1, "alpha"),
    ]);
    let original = encode(&UnversionedRowset::new(schema.clone(), vec![row]));

    let decoded = WireReader::new(original.clone())
        .read_rowset(schema.clone())
        .unwrap();
    assert_eq!(decoded.len(), 1);

    let values = decoded.rows()[0].values();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].column_id, 0);
    assert_eq!(values[0].value, Value::Int64(7));
    assert_eq!(values[1].column_id, 1);
    assert_eq!(values[1].value, Value::String("alpha".to_string()));

    assert_eq!(encode(&decoded), original);
}

#[test]
fn test_id_name_object_matches_row_bytes() {
    let codec = TableCodec::new(named_fields()).unwrap();
    let objects = vec![Named {
        id: 7,
        name: "alpha".to_string(),
    }];
    let row = UnversionedRow::from(vec![
        UnversionedValue::new(0, 7i64),
        UnversionedValue::new(1, "alpha"),
    ]);

    assert_eq!(
        codec.serialize_mapped(&objects).unwrap(),
        encode(&UnversionedRowset::new(named_schema(), vec![row]))
    );
}

#[test]
fn test_even_rows_key_only() {
    let schema = named_schema();
    let rows: Vec<UnversionedRow> = (0..1000)
        .map(|i| {
            UnversionedRow::from(vec![
                UnversionedValue::new(0, i as i64),
                UnversionedValue::new(1, format!("row-{i}")),
            ])
        })
        .collect();

    let mut writer = WireWriter::new();
    writer
        .write_rowset_with(
            &rows,
            &UnversionedRowSerializer::new(schema.clone()),
            |i| i % 2 == 0,
        )
        .unwrap();
    assert_eq!(writer.rows_written(), 1000);

    let decoded = WireReader::new(writer.finish())
        .read_rowset(schema)
        .unwrap();
    assert_eq!(decoded.len(), 1000);

    for (i, row) in decoded.iter().enumerate() {
        assert_eq!(row.get(0), Some(&Value::Int64(i as i64)));
        if i % 2 == 0 {
            assert_eq!(row.len(), 1, "row {}", i);
        } else {
            assert_eq!(row.len(), 2, "row {}", i);
            assert_eq!(row.get(1), Some(&Value::String(format!("row-{i}"))));
        }
    }
}

#[test]
fn test_even_objects_key_only() {
    let codec = TableCodec::new(named_fields()).unwrap();
    let objects: Vec<Named> = (0..1000)
        .map(|i| Named {
            id: i,
            name: format!("n{i}"),
        })
        .collect();

    let chunks = codec
        .serialize_mapped_key_only(&objects, |i| i % 2 == 0)
        .unwrap();
    let decoded = codec.deserialize_mapped(chunks).unwrap();

    for (i, object) in decoded.iter().enumerate() {
        assert_eq!(object.id, i as i64);
        if i % 2 == 0 {
            assert!(object.name.is_empty());
        } else {
            assert_eq!(object.name, format!("n{i}"));
        }
    }
}
