// nmlrs/src/values/value.rs

//! The `Value` enum: one contiguous, typed run of scalar slots.

use super::parsing::{parse_char, parse_float, parse_integer, parse_string};
use crate::error::{NamelistError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar type of a schema item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Int16,
    Int32Native,
    Int32Fixed,
    IntLong,
    Float32,
    Float64,
    String,
    Char,
}

impl ItemType {
    /// The type name used in field listings and diagnostics.
    pub fn type_name(self) -> &'static str {
        match self {
            ItemType::Int16 => "short",
            ItemType::Int32Native => "int",
            ItemType::Int32Fixed => "int32_t",
            ItemType::IntLong => "long",
            ItemType::Float32 => "float",
            ItemType::Float64 => "double",
            ItemType::String => "STRING",
            ItemType::Char => "char",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Storage for every slot of one item, laid out row-major.
///
/// A `String` slot is either an owned string or `None` (the null string).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int16(Vec<i16>),
    Int32Native(Vec<i32>),
    Int32Fixed(Vec<i32>),
    IntLong(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    String(Vec<Option<String>>),
    Char(Vec<char>),
}

impl Value {
    /// Number of scalar slots.
    pub fn len(&self) -> usize {
        match self {
            Value::Int16(v) => v.len(),
            Value::Int32Native(v) | Value::Int32Fixed(v) => v.len(),
            Value::IntLong(v) => v.len(),
            Value::Float32(v) => v.len(),
            Value::Float64(v) => v.len(),
            Value::String(v) => v.len(),
            Value::Char(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Value::Int16(_) => ItemType::Int16,
            Value::Int32Native(_) => ItemType::Int32Native,
            Value::Int32Fixed(_) => ItemType::Int32Fixed,
            Value::IntLong(_) => ItemType::IntLong,
            Value::Float32(_) => ItemType::Float32,
            Value::Float64(_) => ItemType::Float64,
            Value::String(_) => ItemType::String,
            Value::Char(_) => ItemType::Char,
        }
    }

    /// Repeat a single-slot value `len` times. Returns `None` for any other
    /// length mismatch.
    pub fn broadcast(&self, len: usize) -> Option<Value> {
        if self.len() == len {
            return Some(self.clone());
        }
        if self.len() != 1 {
            return None;
        }
        Some(match self {
            Value::Int16(v) => Value::Int16(vec![v[0]; len]),
            Value::Int32Native(v) => Value::Int32Native(vec![v[0]; len]),
            Value::Int32Fixed(v) => Value::Int32Fixed(vec![v[0]; len]),
            Value::IntLong(v) => Value::IntLong(vec![v[0]; len]),
            Value::Float32(v) => Value::Float32(vec![v[0]; len]),
            Value::Float64(v) => Value::Float64(vec![v[0]; len]),
            Value::String(v) => Value::String(vec![v[0].clone(); len]),
            Value::Char(v) => Value::Char(vec![v[0]; len]),
        })
    }

    /// Decode `literal` as this value's type and store it in `slot`.
    ///
    /// `item` only labels the error. A string slot's previous content is
    /// dropped when overwritten.
    pub fn assign(&mut self, slot: usize, literal: &str, item: &str) -> Result<()> {
        let capacity = self.len();
        if slot >= capacity {
            return Err(NamelistError::TooManyValues {
                item: item.to_string(),
                offset: slot,
                supplied: 1,
                capacity,
            });
        }
        match self {
            Value::Int16(v) => v[slot] = parse_integer(item, literal, ItemType::Int16)?,
            Value::Int32Native(v) => {
                v[slot] = parse_integer(item, literal, ItemType::Int32Native)?
            }
            Value::Int32Fixed(v) => v[slot] = parse_integer(item, literal, ItemType::Int32Fixed)?,
            Value::IntLong(v) => v[slot] = parse_integer(item, literal, ItemType::IntLong)?,
            Value::Float32(v) => v[slot] = parse_float(item, literal, ItemType::Float32)?,
            Value::Float64(v) => v[slot] = parse_float(item, literal, ItemType::Float64)?,
            Value::String(v) => v[slot] = parse_string(literal),
            Value::Char(v) => v[slot] = parse_char(item, literal)?,
        }
        Ok(())
    }

    /// Whether slot `idx` holds the same value in `self` and `other`.
    ///
    /// Values of different types never match. Floats compare numerically.
    pub fn slot_eq(&self, other: &Value, idx: usize) -> bool {
        match (self, other) {
            (Value::Int16(a), Value::Int16(b)) => a.get(idx) == b.get(idx),
            (Value::Int32Native(a), Value::Int32Native(b))
            | (Value::Int32Fixed(a), Value::Int32Fixed(b)) => a.get(idx) == b.get(idx),
            (Value::IntLong(a), Value::IntLong(b)) => a.get(idx) == b.get(idx),
            (Value::Float32(a), Value::Float32(b)) => a.get(idx) == b.get(idx),
            (Value::Float64(a), Value::Float64(b)) => a.get(idx) == b.get(idx),
            (Value::String(a), Value::String(b)) => a.get(idx) == b.get(idx),
            (Value::Char(a), Value::Char(b)) => a.get(idx) == b.get(idx),
            _ => false,
        }
    }

    pub fn as_short(&self) -> Option<&[i16]> {
        match self {
            Value::Int16(v) => Some(v),
            _ => None,
        }
    }

    /// Slots of an `Int32Native` or `Int32Fixed` value.
    pub fn as_int(&self) -> Option<&[i32]> {
        match self {
            Value::Int32Native(v) | Value::Int32Fixed(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<&[i64]> {
        match self {
            Value::IntLong(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&[f32]> {
        match self {
            Value::Float32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<&[f64]> {
        match self {
            Value::Float64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[Option<String>]> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_chars(&self) -> Option<&[char]> {
        match self {
            Value::Char(v) => Some(v),
            _ => None,
        }
    }
}
