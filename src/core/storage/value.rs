// src/core/storage/value.rs

//! The dynamically-typed value a key can hold.

use super::binary_string::BinaryString;
use super::zset::SortedSet;
use crate::core::errors::ExoDbError;

/// A value stored under a key. Commands that expect one shape but find the
/// other fail with `ExoDbError::WrongType` rather than coercing.
#[derive(Debug, Clone)]
pub enum Value {
    BinaryString(BinaryString),
    SortedSet(SortedSet),
}

impl Value {
    pub fn as_binary_string(&self) -> Result<&BinaryString, ExoDbError> {
        match self {
            Value::BinaryString(s) => Ok(s),
            Value::SortedSet(_) => Err(ExoDbError::WrongType),
        }
    }

    pub fn as_binary_string_mut(&mut self) -> Result<&mut BinaryString, ExoDbError> {
        match self {
            Value::BinaryString(s) => Ok(s),
            Value::SortedSet(_) => Err(ExoDbError::WrongType),
        }
    }

    pub fn as_sorted_set(&self) -> Result<&SortedSet, ExoDbError> {
        match self {
            Value::SortedSet(z) => Ok(z),
            Value::BinaryString(_) => Err(ExoDbError::WrongType),
        }
    }

    pub fn as_sorted_set_mut(&mut self) -> Result<&mut SortedSet, ExoDbError> {
        match self {
            Value::SortedSet(z) => Ok(z),
            Value::BinaryString(_) => Err(ExoDbError::WrongType),
        }
    }

    /// True if this value carries a wall-clock expiry that has passed.
    /// Sorted sets never expire.
    pub fn has_expired(&self) -> bool {
        match self {
            Value::BinaryString(s) => s.has_expired(),
            Value::SortedSet(_) => false,
        }
    }
}
