// nmlrs/src/values/conversion.rs

//! Conversions from plain Rust data into `Value`.
//!
//! `i32` data maps onto `Int32Native`; build `Value::Int32Fixed` directly
//! for fixed-width items.

use super::value::Value;

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int16(vec![value])
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32Native(vec![value])
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::IntLong(vec![value])
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(vec![value])
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(vec![value])
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(vec![value])
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(vec![Some(value.to_string())])
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(vec![Some(value)])
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        Value::String(vec![value])
    }
}

impl From<Vec<i16>> for Value {
    fn from(value: Vec<i16>) -> Self {
        Value::Int16(value)
    }
}

impl From<Vec<i32>> for Value {
    fn from(value: Vec<i32>) -> Self {
        Value::Int32Native(value)
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::IntLong(value)
    }
}

impl From<Vec<f32>> for Value {
    fn from(value: Vec<f32>) -> Self {
        Value::Float32(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::Float64(value)
    }
}

impl From<Vec<char>> for Value {
    fn from(value: Vec<char>) -> Self {
        Value::Char(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::String(value.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<Option<String>>> for Value {
    fn from(value: Vec<Option<String>>) -> Self {
        Value::String(value)
    }
}
