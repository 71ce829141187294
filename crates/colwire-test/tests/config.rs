//! Configuration loading tests.

use std::io::Write;

use tempfile::NamedTempFile;

use colwire_client::TableCodec;
use colwire_common::error::ErrorCategory;
use colwire_common::types::TableSchema;
use colwire_common::WireConfig;
use colwire_test::fixtures::{named_fields, Named};

#[test]
fn test_codec_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "chunk_size = 8").unwrap();
    writeln!(file, "max_string_length = 64").unwrap();

    let config = WireConfig::from_file(file.path()).unwrap();
    assert_eq!(config.chunk_size, 8);
    assert_eq!(config.max_values_per_row, WireConfig::default().max_values_per_row);

    let codec = TableCodec::with_config(named_fields(), config).unwrap();
    let objects: Vec<Named> = (0..10)
        .map(|i| Named {
            id: i,
            name: "x".repeat(i as usize),
        })
        .collect();

    let chunks = codec.serialize_mapped(&objects).unwrap();
    assert!(chunks.iter().all(|c| c.len() <= 8));
    assert_eq!(codec.deserialize_mapped(chunks).unwrap(), objects);

    let too_long = vec![Named {
        id: 0,
        name: "y".repeat(65),
    }];
    assert!(codec.serialize_mapped(&too_long).unwrap_err().is_encode());
}

#[test]
fn test_invalid_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "chunk_size = 0").unwrap();

    let err = WireConfig::from_file(file.path()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Config);

    let missing = file.path().with_extension("missing");
    assert_eq!(
        WireConfig::from_file(missing).unwrap_err().category(),
        ErrorCategory::Config
    );
}

#[test]
fn test_schema_from_toml() {
    let schema: TableSchema = toml::from_str(
        r#"
        [[columns]]
        name = "id"
        type = "int64"
        is_key = true

        [[columns]]
        name = "name"
        type = "string"
        "#,
    )
    .unwrap();

    assert_eq!(&schema, named_fields().table_schema().as_ref());
}
