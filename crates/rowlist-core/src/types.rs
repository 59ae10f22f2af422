//! Lightweight logical values stored in row blocks.

use serde::{Deserialize, Serialize};

use crate::schema::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
}

impl Scalar {
    /// Logical type of the value; `None` for `Null`, which fits any nullable field.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(_) => Some(DataType::Boolean),
            Scalar::I32(_) => Some(DataType::Int32),
            Scalar::I64(_) => Some(DataType::Int64),
            Scalar::F32(_) => Some(DataType::Float32),
            Scalar::F64(_) => Some(DataType::Float64),
            Scalar::Str(_) => Some(DataType::Utf8),
            Scalar::Bin(_) => Some(DataType::Binary),
        }
    }

    /// Bytes owned on the heap by this value, outside its inline slot.
    pub fn heap_bytes(&self) -> usize {
        match self {
            Scalar::Str(s) => s.len(),
            Scalar::Bin(b) => b.len(),
            _ => 0,
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::I64(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_bytes_counts_only_owned_payloads() {
        assert_eq!(Scalar::I64(7).heap_bytes(), 0);
        assert_eq!(Scalar::Null.heap_bytes(), 0);
        assert_eq!(Scalar::from("hello").heap_bytes(), 5);
        assert_eq!(Scalar::Bin(vec![1, 2, 3]).heap_bytes(), 3);
    }

    #[test]
    fn null_has_no_type() {
        assert_eq!(Scalar::Null.data_type(), None);
        assert_eq!(Scalar::from(1i64).data_type(), Some(DataType::Int64));
    }
}
