//! Typed table codec.
//!
//! [`TableCodec`] bundles the field map of one object type with every
//! serializer variant built on it, so callers pick a conversion path by
//! method name instead of wiring writers and serializers by hand. Every
//! serialize call uses a fresh writer and every deserialize call a fresh
//! reader.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use colwire_common::error::CodecResult;
use colwire_common::types::{TableSchema, UnversionedRow, UnversionedRowset};
use colwire_common::WireConfig;
use colwire_wire::{RowSerializer, UnversionedRowSerializer, WireReader, WireWriter};

use crate::rows::{
    FieldMap, LegacyRowDeserializer, LegacyRowSerializer, MappedRowDeserializer,
    MappedRowSerializer,
};

/// Encodes and decodes objects of type `T` for one table.
pub struct TableCodec<T> {
    /// Empty writer cloned for every serialize call.
    writer: WireWriter,
    fields: Arc<FieldMap<T>>,
    unversioned: UnversionedRowSerializer,
    mapped: MappedRowSerializer<T>,
    mapped_de: MappedRowDeserializer<T>,
    legacy: LegacyRowSerializer<T>,
    legacy_de: LegacyRowDeserializer<T>,
}

impl<T: Default> TableCodec<T> {
    /// Creates a codec with the default wire configuration.
    pub fn new(fields: FieldMap<T>) -> CodecResult<Self> {
        Self::with_config(fields, WireConfig::default())
    }

    /// Creates a codec with the given wire configuration.
    pub fn with_config(fields: FieldMap<T>, config: WireConfig) -> CodecResult<Self> {
        let writer = WireWriter::with_config(config)?;
        let fields = Arc::new(fields);
        Ok(Self {
            writer,
            unversioned: UnversionedRowSerializer::new(fields.table_schema().clone()),
            mapped: MappedRowSerializer::new(Arc::clone(&fields)),
            mapped_de: MappedRowDeserializer::new(Arc::clone(&fields)),
            legacy: LegacyRowSerializer::new(Arc::clone(&fields)),
            legacy_de: LegacyRowDeserializer::new(Arc::clone(&fields)),
            fields,
        })
    }

    /// Returns the table schema.
    pub fn schema(&self) -> &Arc<TableSchema> {
        self.fields.table_schema()
    }

    /// Returns the field map.
    pub fn fields(&self) -> &Arc<FieldMap<T>> {
        &self.fields
    }

    /// Returns the wire configuration.
    pub fn config(&self) -> &WireConfig {
        self.writer.config()
    }

    fn writer(&self) -> WireWriter {
        self.writer.clone()
    }

    fn reader(&self, chunks: Vec<Bytes>) -> CodecResult<WireReader> {
        WireReader::with_config(chunks, self.config().clone())
    }

    /// Serializes objects through the field map.
    pub fn serialize_mapped(&self, rows: &[T]) -> CodecResult<Vec<Bytes>> {
        self.serialize_mapped_key_only(rows, |_| false)
    }

    /// Serializes objects through the field map, writing only key columns
    /// for rows where `key_only(index)` returns true.
    pub fn serialize_mapped_key_only<F>(&self, rows: &[T], key_only: F) -> CodecResult<Vec<Bytes>>
    where
        F: Fn(usize) -> bool,
    {
        let mut writer = self.writer();
        writer.write_rowset_with(rows, &self.mapped, key_only)?;
        Ok(writer.finish())
    }

    /// Serializes unversioned rows laid out by this table's schema.
    pub fn serialize_unversioned(&self, rows: &[UnversionedRow]) -> CodecResult<Vec<Bytes>> {
        let mut writer = self.writer();
        writer.write_rowset(rows, &self.unversioned)?;
        Ok(writer.finish())
    }

    /// Serializes objects through the generic tree.
    pub fn serialize_legacy(&self, rows: &[T]) -> CodecResult<Vec<Bytes>> {
        let mut writer = self.writer();
        writer.write_rowset(rows, &self.legacy)?;
        Ok(writer.finish())
    }

    /// Converts objects into unversioned rows without encoding them.
    pub fn convert_to_unversioned(&self, rows: &[T]) -> CodecResult<Vec<UnversionedRow>> {
        rows.iter().map(|row| self.mapped.serialize(row)).collect()
    }

    /// Decodes objects through the field map.
    pub fn deserialize_mapped(&self, chunks: Vec<Bytes>) -> CodecResult<Vec<T>> {
        self.reader(chunks)?.read_unversioned_rowset(&self.mapped_de)
    }

    /// Decodes objects through the field map, handing each to `consumer`.
    ///
    /// Returns the number of objects decoded.
    pub fn deserialize_mapped_with<F>(&self, chunks: Vec<Bytes>, consumer: F) -> CodecResult<usize>
    where
        F: FnMut(T),
    {
        self.reader(chunks)?
            .read_unversioned_rowset_with(&self.mapped_de, consumer)
    }

    /// Decodes unversioned rows.
    pub fn deserialize_unversioned(&self, chunks: Vec<Bytes>) -> CodecResult<UnversionedRowset> {
        self.reader(chunks)?.read_rowset(self.schema().clone())
    }

    /// Decodes objects through the generic tree.
    pub fn deserialize_legacy(&self, chunks: Vec<Bytes>) -> CodecResult<Vec<T>> {
        self.reader(chunks)?.read_unversioned_rowset(&self.legacy_de)
    }
}

impl<T> fmt::Debug for TableCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCodec")
            .field("config", self.writer.config())
            .field("schema", self.fields.table_schema())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colwire_common::error::CodecError;
    use colwire_common::types::{UnversionedValue, Value, ValueType};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Account {
        id: u64,
        owner: String,
        balance: i64,
        active: bool,
    }

    fn codec() -> TableCodec<Account> {
        let fields = FieldMap::<Account>::builder()
            .key("id", ValueType::Uint64, |a| &a.id, |a| &mut a.id)
            .column("owner", ValueType::String, |a| &a.owner, |a| &mut a.owner)
            .column("balance", ValueType::Int64, |a| &a.balance, |a| &mut a.balance)
            .column("active", ValueType::Boolean, |a| &a.active, |a| &mut a.active)
            .build()
            .unwrap();
        TableCodec::with_config(fields, WireConfig::default().with_chunk_size(16)).unwrap()
    }

    fn accounts() -> Vec<Account> {
        (0..20)
            .map(|i| Account {
                id: i,
                owner: format!("owner-{i}"),
                balance: i as i64 * -100,
                active: i % 3 == 0,
            })
            .collect()
    }

    #[test]
    fn test_all_paths_agree() {
        let codec = codec();
        let accounts = accounts();

        let mapped = codec.serialize_mapped(&accounts).unwrap();
        let legacy = codec.serialize_legacy(&accounts).unwrap();
        let rows = codec.convert_to_unversioned(&accounts).unwrap();
        let unversioned = codec.serialize_unversioned(&rows).unwrap();

        assert_eq!(mapped, legacy);
        assert_eq!(mapped, unversioned);
        assert!(mapped.iter().all(|c| c.len() <= 16));

        assert_eq!(codec.deserialize_mapped(mapped.clone()).unwrap(), accounts);
        assert_eq!(codec.deserialize_legacy(mapped.clone()).unwrap(), accounts);
        assert_eq!(
            codec.deserialize_unversioned(mapped).unwrap().into_rows(),
            rows
        );
    }

    #[test]
    fn test_key_only_and_consumer() {
        let codec = codec();
        let accounts = accounts();
        let chunks = codec
            .serialize_mapped_key_only(&accounts, |i| i >= 10)
            .unwrap();

        let mut decoded = Vec::new();
        let count = codec
            .deserialize_mapped_with(chunks, |a| decoded.push(a))
            .unwrap();
        assert_eq!(count, 20);
        assert_eq!(decoded[..10], accounts[..10]);
        assert_eq!(
            decoded[15],
            Account {
                id: 15,
                ..Account::default()
            }
        );
    }

    #[test]
    fn test_unversioned_rows_are_checked() {
        let codec = codec();
        let bad = UnversionedRow::from(vec![UnversionedValue::new(2, Value::from("x"))]);
        let err = codec.serialize_unversioned(&[bad]).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn test_config_is_kept() {
        let codec = codec();
        assert_eq!(codec.config().chunk_size, 16);

        let first = codec.serialize_mapped(&accounts()).unwrap();
        let second = codec.serialize_mapped(&accounts()).unwrap();
        assert_eq!(first, second);
        assert!(second.iter().all(|c| c.len() <= 16));

        let fields = FieldMap::<Account>::builder()
            .key("id", ValueType::Uint64, |a| &a.id, |a| &mut a.id)
            .build()
            .unwrap();
        let err = TableCodec::with_config(fields, WireConfig::default().with_chunk_size(usize::MAX))
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidConfig { .. }));
    }

    #[test]
    fn test_truncated_input() {
        let codec = codec();
        let mut chunks = codec.serialize_mapped(&accounts()).unwrap();
        chunks.pop();
        assert!(codec.deserialize_mapped(chunks).unwrap_err().is_decode());
    }
}
