//! Field maps.
//!
//! A field map is the static declaration of how an object type maps onto
//! table columns: for each column, its name, its value type, whether it is a
//! key, and a pair of accessors reaching the backing field. The table schema
//! is derived from the declaration once, when the map is built.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use colwire_common::error::{CodecError, CodecResult};
use colwire_common::types::{
    ColumnSchema, TableSchema, TreeNode, UnversionedRow, UnversionedValue, Value, ValueType,
};

use super::ColumnValue;

type ReadField<T> = Box<dyn Fn(&T, &str, ValueType) -> CodecResult<Value> + Send + Sync>;
type WriteField<T> = Box<dyn Fn(&mut T, Value, &str, ValueType) -> CodecResult<()> + Send + Sync>;

struct Field<T> {
    column: ColumnSchema,
    read: ReadField<T>,
    write: WriteField<T>,
}

impl<T> Field<T> {
    fn read(&self, object: &T) -> CodecResult<Value> {
        (self.read)(object, &self.column.name, self.column.value_type)
    }

    fn write(&self, object: &mut T, value: Value) -> CodecResult<()> {
        (self.write)(object, value, &self.column.name, self.column.value_type)
    }
}

/// Column declarations for objects of type `T`.
pub struct FieldMap<T> {
    fields: Vec<Field<T>>,
    schema: Arc<TableSchema>,
}

impl<T> FieldMap<T> {
    /// Starts a new declaration.
    pub fn builder() -> FieldMapBuilder<T> {
        FieldMapBuilder { fields: Vec::new() }
    }

    /// Returns the table schema derived from the declaration.
    ///
    /// Every call returns the same schema.
    pub fn table_schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    /// Returns the number of declared columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts an object into a row holding every declared column.
    ///
    /// Fields holding no value become explicit nulls.
    pub fn to_row(&self, object: &T) -> CodecResult<UnversionedRow> {
        let mut row = UnversionedRow::with_capacity(self.fields.len());
        for (id, field) in self.fields.iter().enumerate() {
            row.push(UnversionedValue {
                column_id: id as u16,
                value: field.read(object)?,
            });
        }
        Ok(row)
    }

    /// Converts an object into a tree map keyed by column name.
    pub fn to_tree(&self, object: &T) -> CodecResult<BTreeMap<String, TreeNode>> {
        let mut map = BTreeMap::new();
        for field in &self.fields {
            let value = field.read(object)?;
            map.insert(field.column.name.clone(), TreeNode::from(&value));
        }
        Ok(map)
    }

    /// Assigns the values of a row onto an object.
    ///
    /// Columns absent from the row leave the object untouched.
    pub fn assign_row(&self, object: &mut T, row: UnversionedRow) -> CodecResult<()> {
        for value in row {
            let field = self.field(value.column_id)?;
            field.write(object, value.value)?;
        }
        Ok(())
    }

    /// Assigns the entries of a tree map onto an object.
    pub fn assign_tree(&self, object: &mut T, map: BTreeMap<String, TreeNode>) -> CodecResult<()> {
        for (name, node) in map {
            let id = self
                .schema
                .find_column(&name)
                .ok_or(CodecError::UnknownColumn { name })?;
            let field = self.field(id)?;
            let value = node.to_value(&field.column.name, field.column.value_type)?;
            field.write(object, value)?;
        }
        Ok(())
    }

    fn field(&self, column_id: u16) -> CodecResult<&Field<T>> {
        self.fields
            .get(usize::from(column_id))
            .ok_or(CodecError::ColumnIdOutOfRange {
                column_id,
                column_count: self.fields.len(),
            })
    }
}

impl<T: Default> FieldMap<T> {
    /// Builds an object from a row, starting from `T::default()`.
    pub fn from_row(&self, row: UnversionedRow) -> CodecResult<T> {
        let mut object = T::default();
        self.assign_row(&mut object, row)?;
        Ok(object)
    }

    /// Builds an object from a tree map, starting from `T::default()`.
    pub fn from_tree(&self, map: BTreeMap<String, TreeNode>) -> CodecResult<T> {
        let mut object = T::default();
        self.assign_tree(&mut object, map)?;
        Ok(object)
    }
}

impl<T> fmt::Debug for FieldMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMap")
            .field("schema", &self.schema)
            .finish()
    }
}

/// Builder for [`FieldMap`].
pub struct FieldMapBuilder<T> {
    fields: Vec<Field<T>>,
}

impl<T: 'static> FieldMapBuilder<T> {
    /// Declares a key column. Key columns must precede all other columns.
    pub fn key<V, G, M>(
        self,
        name: impl Into<String>,
        value_type: ValueType,
        get: G,
        get_mut: M,
    ) -> Self
    where
        V: ColumnValue + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        self.push(ColumnSchema::key(name, value_type), get, get_mut)
    }

    /// Declares a non-key column.
    pub fn column<V, G, M>(
        self,
        name: impl Into<String>,
        value_type: ValueType,
        get: G,
        get_mut: M,
    ) -> Self
    where
        V: ColumnValue + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        self.push(ColumnSchema::new(name, value_type), get, get_mut)
    }

    fn push<V, G, M>(mut self, column: ColumnSchema, get: G, get_mut: M) -> Self
    where
        V: ColumnValue + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        self.fields.push(Field {
            column,
            read: Box::new(move |object: &T, name: &str, value_type: ValueType| {
                get(object).to_value(name, value_type)
            }),
            write: Box::new(move |object: &mut T, value: Value, name: &str, value_type: ValueType| {
                *get_mut(object) = V::from_value(value, name, value_type)?;
                Ok(())
            }),
        });
        self
    }

    /// Derives the table schema and finishes the declaration.
    pub fn build(self) -> CodecResult<FieldMap<T>> {
        let columns = self.fields.iter().map(|f| f.column.clone()).collect();
        let schema = TableSchema::new(columns)?.into_shared();
        Ok(FieldMap {
            fields: self.fields,
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::AnyValue;
    use bytes::Bytes;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Item {
        id: u32,
        name: String,
        weight: Option<f64>,
        extra: AnyValue,
    }

    fn item_fields() -> FieldMap<Item> {
        FieldMap::<Item>::builder()
            .key("id", ValueType::Int64, |o| &o.id, |o| &mut o.id)
            .column("name", ValueType::String, |o| &o.name, |o| &mut o.name)
            .column("weight", ValueType::Double, |o| &o.weight, |o| &mut o.weight)
            .column("extra", ValueType::Any, |o| &o.extra, |o| &mut o.extra)
            .build()
            .unwrap()
    }

    fn item() -> Item {
        Item {
            id: 9,
            name: "bolt".to_string(),
            weight: None,
            extra: AnyValue::new(Bytes::from_static(b"[1;2]")),
        }
    }

    #[test]
    fn test_schema_derivation() {
        let fields = item_fields();
        let schema = fields.table_schema();
        assert_eq!(schema.column_count(), 4);
        assert_eq!(schema.key_column_count(), 1);
        assert_eq!(schema.column(2).unwrap().name, "weight");
        assert!(Arc::ptr_eq(schema, fields.table_schema()));
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_row_roundtrip() {
        let fields = item_fields();
        let row = fields.to_row(&item()).unwrap();
        assert_eq!(row.len(), 4);
        assert_eq!(row.get(0), Some(&Value::Int64(9)));
        assert_eq!(row.get(2), Some(&Value::Null));
        row.validate(fields.table_schema(), false).unwrap();

        assert_eq!(fields.from_row(row).unwrap(), item());
    }

    #[test]
    fn test_sparse_row_keeps_defaults() {
        let fields = item_fields();
        let row = UnversionedRow::from(vec![UnversionedValue::new(0, 4i64)]);
        let object = fields.from_row(row).unwrap();
        assert_eq!(object.id, 4);
        assert_eq!(object.name, "");
        assert_eq!(object.weight, None);
    }

    #[test]
    fn test_tree_roundtrip() {
        let fields = item_fields();
        let tree = fields.to_tree(&item()).unwrap();
        assert_eq!(tree.get("weight"), Some(&TreeNode::Entity));
        assert_eq!(tree.get("name"), Some(&TreeNode::from("bolt")));
        assert_eq!(fields.from_tree(tree).unwrap(), item());

        let mut unknown = BTreeMap::new();
        unknown.insert("nope".to_string(), TreeNode::Int64(1));
        assert!(matches!(
            fields.from_tree(unknown),
            Err(CodecError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_conversion_errors() {
        let fields = item_fields();
        let row = UnversionedRow::from(vec![UnversionedValue::new(0, -1i64)]);
        assert!(fields.from_row(row).unwrap_err().is_encode());

        let row = UnversionedRow::from(vec![UnversionedValue::new(7, 1i64)]);
        assert!(fields.from_row(row).unwrap_err().is_schema());
    }

    #[test]
    fn test_invalid_declaration() {
        let result = FieldMap::<Item>::builder()
            .column("name", ValueType::String, |o| &o.name, |o| &mut o.name)
            .key("id", ValueType::Int64, |o| &o.id, |o| &mut o.id)
            .build();
        assert!(result.unwrap_err().is_schema());
    }
}
