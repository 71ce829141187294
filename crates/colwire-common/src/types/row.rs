//! Unversioned rows and rowsets.
//!
//! A row is an ordered sequence of column-tagged values. Rows may be sparse:
//! non-key columns can be omitted entirely. A rowset pairs rows with the
//! schema that gives their column ids meaning.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{TableSchema, TreeNode, UnversionedValue, Value, ValueType};
use crate::error::{CodecError, CodecResult};

/// An ordered sequence of column-tagged values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnversionedRow {
    values: Vec<UnversionedValue>,
}

impl UnversionedRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Creates an empty row with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value.
    pub fn push(&mut self, value: UnversionedValue) {
        self.values.push(value);
    }

    /// Returns the values in order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[UnversionedValue] {
        &self.values
    }

    /// Consumes the row and returns its values.
    #[must_use]
    pub fn into_values(self) -> Vec<UnversionedValue> {
        self.values
    }

    /// Returns the number of values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value stored for the given column, if present.
    #[must_use]
    pub fn get(&self, column_id: u16) -> Option<&Value> {
        self.values
            .iter()
            .find(|v| v.column_id == column_id)
            .map(|v| &v.value)
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> std::slice::Iter<'_, UnversionedValue> {
        self.values.iter()
    }

    /// Returns a copy of this row holding only key column values.
    #[must_use]
    pub fn key_projection(&self, key_column_count: usize) -> Self {
        let values = self
            .values
            .iter()
            .filter(|v| usize::from(v.column_id) < key_column_count)
            .cloned()
            .collect();
        Self { values }
    }

    /// Checks this row against a schema.
    ///
    /// Every column id must be unique and inside the schema, and every
    /// non-null value must carry its column's type. With `key_only`, every
    /// key column must be present.
    pub fn validate(&self, schema: &TableSchema, key_only: bool) -> CodecResult<()> {
        let mut seen = vec![false; schema.column_count()];

        for value in &self.values {
            let column = schema
                .column(value.column_id)
                .ok_or(CodecError::ColumnIdOutOfRange {
                    column_id: value.column_id,
                    column_count: schema.column_count(),
                })?;

            let slot = &mut seen[usize::from(value.column_id)];
            if *slot {
                return Err(CodecError::DuplicateColumn {
                    column_id: value.column_id,
                });
            }
            *slot = true;

            let actual = value.value_type();
            if actual != ValueType::Null && actual != column.value_type {
                return Err(CodecError::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.value_type,
                    actual,
                });
            }
        }

        if key_only {
            if let Some(missing) = schema
                .key_columns()
                .iter()
                .zip(&seen)
                .find(|(_, present)| !**present)
            {
                return Err(CodecError::MissingKeyColumn {
                    column: missing.0.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Converts the row into a tree map keyed by column name.
    pub fn to_tree_map(&self, schema: &TableSchema) -> CodecResult<BTreeMap<String, TreeNode>> {
        let mut map = BTreeMap::new();
        for value in &self.values {
            let column = schema
                .column(value.column_id)
                .ok_or(CodecError::ColumnIdOutOfRange {
                    column_id: value.column_id,
                    column_count: schema.column_count(),
                })?;
            map.insert(column.name.clone(), TreeNode::from(&value.value));
        }
        Ok(map)
    }

    /// Builds a row from a tree map keyed by column name.
    ///
    /// Values are emitted in schema order. Columns missing from the map are
    /// omitted; an [`TreeNode::Entity`] becomes an explicit null.
    pub fn from_tree_map(
        map: &BTreeMap<String, TreeNode>,
        schema: &TableSchema,
    ) -> CodecResult<Self> {
        if let Some(unknown) = map.keys().find(|name| schema.find_column(name).is_none()) {
            return Err(CodecError::UnknownColumn {
                name: unknown.clone(),
            });
        }

        let mut row = Self::with_capacity(map.len());
        for (id, column) in schema.columns().iter().enumerate() {
            if let Some(node) = map.get(&column.name) {
                let value = node.to_value(&column.name, column.value_type)?;
                row.push(UnversionedValue {
                    column_id: id as u16,
                    value,
                });
            }
        }
        Ok(row)
    }
}

impl From<Vec<UnversionedValue>> for UnversionedRow {
    fn from(values: Vec<UnversionedValue>) -> Self {
        Self { values }
    }
}

impl FromIterator<UnversionedValue> for UnversionedRow {
    fn from_iter<I: IntoIterator<Item = UnversionedValue>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for UnversionedRow {
    type Item = UnversionedValue;
    type IntoIter = std::vec::IntoIter<UnversionedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a UnversionedRow {
    type Item = &'a UnversionedValue;
    type IntoIter = std::slice::Iter<'a, UnversionedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for UnversionedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

/// A schema paired with an ordered collection of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct UnversionedRowset {
    schema: Arc<TableSchema>,
    rows: Vec<UnversionedRow>,
}

impl UnversionedRowset {
    /// Creates a rowset.
    #[must_use]
    pub fn new(schema: Arc<TableSchema>, rows: Vec<UnversionedRow>) -> Self {
        Self { schema, rows }
    }

    /// Returns the schema shared by all rows.
    #[must_use]
    pub fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[UnversionedRow] {
        &self.rows
    }

    /// Consumes the rowset and returns its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<UnversionedRow> {
        self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the rowset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, UnversionedRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a UnversionedRowset {
    type Item = &'a UnversionedRow;
    type IntoIter = std::slice::Iter<'a, UnversionedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn test_schema() -> TableSchema {
        TableSchema::builder()
            .key_column("id", ValueType::Int64)
            .column("name", ValueType::String)
            .column("blob", ValueType::Bytes)
            .column("extra", ValueType::Any)
            .build()
            .unwrap()
    }

    fn full_row() -> UnversionedRow {
        UnversionedRow::from(vec![
            UnversionedValue::new(0, 7i64),
            UnversionedValue::new(1, "alpha"),
            UnversionedValue::new(2, Bytes::from_static(b"\x00\x01")),
            UnversionedValue::new(3, Value::Any(Bytes::from_static(b"{a=1}"))),
        ])
    }

    #[test]
    fn test_row_access() {
        let row = full_row();
        assert_eq!(row.len(), 4);
        assert_eq!(row.get(1), Some(&Value::from("alpha")));
        assert_eq!(row.get(9), None);
        assert_eq!(row.to_string(), "(#0=7, #1=\"alpha\", #2=bytes[2], #3=any[5])");
    }

    #[test]
    fn test_validate_ok() {
        let schema = test_schema();
        assert!(full_row().validate(&schema, false).is_ok());

        let sparse = UnversionedRow::from(vec![
            UnversionedValue::new(0, 1i64),
            UnversionedValue::null(1),
        ]);
        assert!(sparse.validate(&schema, false).is_ok());
    }

    #[test]
    fn test_validate_errors() {
        let schema = test_schema();

        let out_of_range = UnversionedRow::from(vec![UnversionedValue::new(4, 1i64)]);
        assert!(matches!(
            out_of_range.validate(&schema, false),
            Err(CodecError::ColumnIdOutOfRange { column_id: 4, .. })
        ));

        let duplicate = UnversionedRow::from(vec![
            UnversionedValue::new(0, 1i64),
            UnversionedValue::new(0, 2i64),
        ]);
        assert!(matches!(
            duplicate.validate(&schema, false),
            Err(CodecError::DuplicateColumn { column_id: 0 })
        ));

        let wrong_type = UnversionedRow::from(vec![UnversionedValue::new(1, 5i64)]);
        assert!(matches!(
            wrong_type.validate(&schema, false),
            Err(CodecError::TypeMismatch { .. })
        ));

        let no_key = UnversionedRow::from(vec![UnversionedValue::new(1, "x")]);
        assert!(no_key.validate(&schema, false).is_ok());
        assert!(matches!(
            no_key.validate(&schema, true),
            Err(CodecError::MissingKeyColumn { .. })
        ));
    }

    #[test]
    fn test_key_projection() {
        let key = full_row().key_projection(1);
        assert_eq!(key.len(), 1);
        assert_eq!(key.get(0), Some(&Value::Int64(7)));
        assert!(key.validate(&test_schema(), true).is_ok());
    }

    #[test]
    fn test_tree_map_roundtrip() {
        let schema = test_schema();
        let row = full_row();
        let map = row.to_tree_map(&schema).unwrap();
        assert_eq!(map.get("id"), Some(&TreeNode::Int64(7)));
        assert_eq!(
            map.get("extra"),
            Some(&TreeNode::Raw(Bytes::from_static(b"{a=1}")))
        );

        let back = UnversionedRow::from_tree_map(&map, &schema).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_from_tree_map_errors() {
        let schema = test_schema();

        let mut map = BTreeMap::new();
        map.insert("nope".to_string(), TreeNode::Int64(1));
        assert!(matches!(
            UnversionedRow::from_tree_map(&map, &schema),
            Err(CodecError::UnknownColumn { .. })
        ));

        let mut map = BTreeMap::new();
        map.insert("name".to_string(), TreeNode::Int64(1));
        let err = UnversionedRow::from_tree_map(&map, &schema).unwrap_err();
        assert!(err.is_encode());

        let mut map = BTreeMap::new();
        map.insert("extra".to_string(), TreeNode::List(Vec::new()));
        assert!(UnversionedRow::from_tree_map(&map, &schema).is_err());
    }

    #[test]
    fn test_from_tree_map_integer_conversion() {
        let schema = TableSchema::builder()
            .column("u", ValueType::Uint64)
            .column("i", ValueType::Int64)
            .build()
            .unwrap();

        let mut map = BTreeMap::new();
        map.insert("u".to_string(), TreeNode::Int64(5));
        map.insert("i".to_string(), TreeNode::Uint64(6));
        let row = UnversionedRow::from_tree_map(&map, &schema).unwrap();
        assert_eq!(row.get(0), Some(&Value::Uint64(5)));
        assert_eq!(row.get(1), Some(&Value::Int64(6)));

        map.insert("u".to_string(), TreeNode::Int64(-1));
        assert!(UnversionedRow::from_tree_map(&map, &schema).is_err());

        map.insert("u".to_string(), TreeNode::Entity);
        map.insert("i".to_string(), TreeNode::Uint64(u64::MAX));
        assert!(UnversionedRow::from_tree_map(&map, &schema).is_err());
    }

    #[test]
    fn test_rowset() {
        let schema = Arc::new(test_schema());
        let rowset = UnversionedRowset::new(schema.clone(), vec![full_row(), full_row()]);
        assert_eq!(rowset.len(), 2);
        assert!(!rowset.is_empty());
        assert_eq!(rowset.schema(), &schema);
        assert_eq!(rowset.iter().count(), 2);
        assert_eq!(rowset.into_rows().len(), 2);
    }
}
