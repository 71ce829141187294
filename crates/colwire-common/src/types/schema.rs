//! Table schema.
//!
//! A schema is the ordered list of column definitions every row must honor.
//! Column ids used on the wire are positions in this list. Key columns form
//! a contiguous prefix.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ValueType;
use crate::constants::MAX_COLUMN_COUNT;
use crate::error::{CodecError, CodecResult};

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name, unique within the schema.
    pub name: String,
    /// Column type.
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Whether the column is part of the key.
    #[serde(default)]
    pub is_key: bool,
}

impl ColumnSchema {
    /// Creates a non-key column.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            is_key: false,
        }
    }

    /// Creates a key column.
    pub fn key(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            is_key: true,
        }
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value_type)?;
        if self.is_key {
            write!(f, " (key)")?;
        }
        Ok(())
    }
}

/// An immutable, validated table schema.
///
/// # Example
///
/// ```rust
/// use colwire_common::types::{TableSchema, ValueType};
///
/// let schema = TableSchema::builder()
///     .key_column("id", ValueType::Int64)
///     .column("name", ValueType::String)
///     .build()
///     .unwrap();
/// assert_eq!(schema.key_column_count(), 1);
/// assert_eq!(schema.find_column("name"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableSchema {
    columns: Vec<ColumnSchema>,
    #[serde(skip)]
    key_column_count: usize,
}

impl TableSchema {
    /// Creates a schema, checking all schema invariants.
    pub fn new(columns: Vec<ColumnSchema>) -> CodecResult<Self> {
        if columns.len() > MAX_COLUMN_COUNT {
            return Err(CodecError::invalid_schema(format!(
                "{} columns exceeds the maximum of {MAX_COLUMN_COUNT}",
                columns.len()
            )));
        }

        let mut names = HashSet::with_capacity(columns.len());
        let mut key_column_count = 0;
        let mut seen_value_column = false;

        for column in &columns {
            if column.name.is_empty() {
                return Err(CodecError::invalid_schema("column name is empty"));
            }
            if !names.insert(column.name.as_str()) {
                return Err(CodecError::invalid_schema(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
            if column.value_type == ValueType::Null {
                return Err(CodecError::invalid_schema(format!(
                    "column '{}' cannot be declared null",
                    column.name
                )));
            }

            if column.is_key {
                if seen_value_column {
                    return Err(CodecError::invalid_schema(format!(
                        "key column '{}' follows a non-key column",
                        column.name
                    )));
                }
                if column.value_type == ValueType::Any {
                    return Err(CodecError::invalid_schema(format!(
                        "key column '{}' cannot be of type any",
                        column.name
                    )));
                }
                key_column_count += 1;
            } else {
                seen_value_column = true;
            }
        }

        Ok(Self {
            columns,
            key_column_count,
        })
    }

    /// Returns a builder for a new schema.
    #[must_use]
    pub fn builder() -> TableSchemaBuilder {
        TableSchemaBuilder::default()
    }

    /// Returns all columns in declaration order.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    /// Returns the column with the given id.
    #[inline]
    #[must_use]
    pub fn column(&self, column_id: u16) -> Option<&ColumnSchema> {
        self.columns.get(usize::from(column_id))
    }

    /// Returns the number of columns.
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of key columns.
    #[inline]
    #[must_use]
    pub fn key_column_count(&self) -> usize {
        self.key_column_count
    }

    /// Returns the key columns.
    #[must_use]
    pub fn key_columns(&self) -> &[ColumnSchema] {
        &self.columns[..self.key_column_count]
    }

    /// Returns true if the given column id is a key column.
    #[inline]
    #[must_use]
    pub fn is_key_column(&self, column_id: u16) -> bool {
        usize::from(column_id) < self.key_column_count
    }

    /// Looks up a column id by name.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<u16> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(|idx| idx as u16)
    }

    /// Returns the schema restricted to its key columns.
    #[must_use]
    pub fn to_key_schema(&self) -> Self {
        Self {
            columns: self.key_columns().to_vec(),
            key_column_count: self.key_column_count,
        }
    }

    /// Wraps the schema in an `Arc` for sharing.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<'de> Deserialize<'de> for TableSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            columns: Vec<ColumnSchema>,
        }

        let raw = Raw::deserialize(deserializer)?;
        TableSchema::new(raw.columns).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{column}")?;
        }
        write!(f, "]")
    }
}

/// Builder for [`TableSchema`].
#[derive(Debug, Default)]
pub struct TableSchemaBuilder {
    columns: Vec<ColumnSchema>,
}

impl TableSchemaBuilder {
    /// Appends a key column.
    #[must_use]
    pub fn key_column(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.columns.push(ColumnSchema::key(name, value_type));
        self
    }

    /// Appends a non-key column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.columns.push(ColumnSchema::new(name, value_type));
        self
    }

    /// Appends a prepared column definition.
    #[must_use]
    pub fn add(mut self, column: ColumnSchema) -> Self {
        self.columns.push(column);
        self
    }

    /// Builds and validates the schema.
    pub fn build(self) -> CodecResult<TableSchema> {
        TableSchema::new(self.columns)
    }
}
