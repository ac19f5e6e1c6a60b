// nmlrs/src/values/tests.rs

//! Tests for the values module.

use super::*;
use crate::error::NamelistError;

#[test]
fn test_integer_parsing() {
    assert_eq!(parse_integer::<i64>("n", "42", ItemType::IntLong).unwrap(), 42);
    assert_eq!(parse_integer::<i64>("n", " -123 ", ItemType::IntLong).unwrap(), -123);
    assert_eq!(parse_integer::<i32>("n", "+7", ItemType::Int32Native).unwrap(), 7);
    assert!(parse_integer::<i64>("n", "3.14", ItemType::IntLong).is_err());
    assert!(parse_integer::<i64>("n", "", ItemType::IntLong).is_err());
}

#[test]
fn test_integer_overflow_is_rejected() {
    assert_eq!(parse_integer::<i16>("n", "32767", ItemType::Int16).unwrap(), i16::MAX);
    let err = parse_integer::<i16>("n", "40000", ItemType::Int16).unwrap_err();
    assert_eq!(
        err,
        NamelistError::InvalidValue {
            item: "n".to_string(),
            value: "40000".to_string(),
            expected_type: "short".to_string(),
        }
    );
}

#[test]
fn test_float_parsing() {
    assert_eq!(parse_float::<f64>("x", "3.5", ItemType::Float64).unwrap(), 3.5);
    assert_eq!(parse_float::<f64>("x", "1.25e2", ItemType::Float64).unwrap(), 125.0);
    assert_eq!(parse_float::<f64>("x", "1.0d-1", ItemType::Float64).unwrap(), 0.1);
    assert_eq!(parse_float::<f64>("x", "2D3", ItemType::Float64).unwrap(), 2000.0);
    assert_eq!(parse_float::<f32>("x", "8", ItemType::Float32).unwrap(), 8.0);
    assert_eq!(
        parse_float::<f64>("x", "-inf", ItemType::Float64).unwrap(),
        f64::NEG_INFINITY
    );
    assert!(parse_float::<f64>("x", "nan", ItemType::Float64).unwrap().is_nan());
    assert!(parse_float::<f64>("x", "abc", ItemType::Float64).is_err());
    assert!(parse_float::<f64>("x", "1.5x", ItemType::Float64).is_err());
}

#[test]
fn test_string_and_char_parsing() {
    assert_eq!(parse_string("a, b"), Some("a, b".to_string()));
    assert_eq!(parse_string(""), Some(String::new()));
    assert_eq!(parse_string("{NULL}"), None);

    assert_eq!(parse_char("c", "y").unwrap(), 'y');
    assert!(parse_char("c", "").is_err());
    assert!(parse_char("c", "yes").is_err());
}

#[test]
fn test_format_exponential() {
    assert_eq!(format_exponential(0.5, 8), "5.00000000e-01");
    assert_eq!(format_exponential(1000.0, 15), "1.000000000000000e+03");
    assert_eq!(format_exponential(0.0, 8), "0.00000000e+00");
    assert_eq!(format_exponential(-2.5e-120, 3), "-2.500e-120");
    assert_eq!(format_exponential(f64::NAN, 8), "nan");
    assert_eq!(format_exponential(f64::NEG_INFINITY, 8), "-inf");
}

#[test]
fn test_render_slot() {
    assert_eq!(Value::from(8i64).render_slot(0).unwrap(), "8");
    assert_eq!(Value::from(-3i16).render_slot(0).unwrap(), "-3");
    assert_eq!(Value::from(0.5f32).render_slot(0).unwrap(), "5.00000000e-01");
    assert_eq!(
        Value::from(0.5f64).render_slot(0).unwrap(),
        "5.000000000000000e-01"
    );
    assert_eq!(Value::from("a, b").render_slot(0).unwrap(), "\"a, b\"");
    assert_eq!(Value::from(None::<String>).render_slot(0).unwrap(), "{NULL}");
    assert_eq!(Value::from('y').render_slot(0).unwrap(), "\"y\"");
    assert_eq!(Value::from('"').render_slot(0).unwrap(), "\"\\\"\"");
    assert_eq!(Value::from(1i64).render_slot(1), None);
}

#[test]
fn test_assign_decodes_by_type() {
    let mut value = Value::Float64(vec![0.0; 3]);
    value.assign(1, "2.5", "w").unwrap();
    assert_eq!(value.as_double().unwrap(), &[0.0, 2.5, 0.0]);

    let mut value = Value::String(vec![None; 2]);
    value.assign(0, "first", "s").unwrap();
    value.assign(0, "second", "s").unwrap();
    assert_eq!(
        value.as_strings().unwrap(),
        &[Some("second".to_string()), None]
    );

    let mut value = Value::Int16(vec![0]);
    assert!(matches!(
        value.assign(0, "x", "n"),
        Err(NamelistError::InvalidValue { .. })
    ));
    assert!(matches!(
        value.assign(1, "1", "n"),
        Err(NamelistError::TooManyValues { .. })
    ));
}

#[test]
fn test_broadcast() {
    let value = Value::from(0.0f64).broadcast(4).unwrap();
    assert_eq!(value.as_double().unwrap(), &[0.0; 4]);
    assert_eq!(Value::from(vec![1i64, 2]).broadcast(2).unwrap().len(), 2);
    assert!(Value::from(vec![1i64, 2]).broadcast(3).is_none());
}

#[test]
fn test_slot_eq() {
    let a = Value::from(vec![1i64, 2, 3]);
    let b = Value::from(vec![1i64, 5, 3]);
    assert!(a.slot_eq(&b, 0));
    assert!(!a.slot_eq(&b, 1));
    assert!(!a.slot_eq(&Value::from(vec![1i32, 2, 3]), 0));
    assert!(!Value::Int32Fixed(vec![1]).slot_eq(&Value::Int32Native(vec![1]), 0));
}

#[test]
fn test_type_names() {
    assert_eq!(Value::Int32Fixed(vec![0]).item_type(), ItemType::Int32Fixed);
    assert_eq!(ItemType::String.to_string(), "STRING");
    assert_eq!(ItemType::IntLong.type_name(), "long");
}
