//! Logical schema types. Pure data; row blocks share one `Schema` per list.

use serde::{Deserialize, Serialize};

use crate::types::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Utf8,
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }

    /// Whether `value` may be stored in this field.
    pub fn accepts(&self, value: &Scalar) -> bool {
        match value.data_type() {
            None => self.nullable,
            Some(dt) => dt == self.data_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Number of values in every row of this schema.
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Check that `row` has the schema's arity and every value fits its field.
    pub fn conforms(&self, row: &[Scalar]) -> bool {
        row.len() == self.fields.len()
            && self.fields.iter().zip(row).all(|(f, v)| f.accepts(v))
    }
}
