// nmlrs/src/values/formatting.rs

//! Render single slots the way the printer writes them.

use super::value::Value;
use crate::scanner::quoting::{render_string, QUOTE};

/// Scientific notation with `precision` fraction digits and a signed,
/// at-least-two-digit exponent (`5.00000000e-01`).
pub fn format_exponential(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

impl Value {
    /// Text of slot `idx` as the printer writes it, without separator.
    ///
    /// Returns `None` when `idx` is out of range.
    pub fn render_slot(&self, idx: usize) -> Option<String> {
        let text = match self {
            Value::Int16(v) => v.get(idx)?.to_string(),
            Value::Int32Native(v) | Value::Int32Fixed(v) => v.get(idx)?.to_string(),
            Value::IntLong(v) => v.get(idx)?.to_string(),
            Value::Float32(v) => format_exponential(f64::from(*v.get(idx)?), 8),
            Value::Float64(v) => format_exponential(*v.get(idx)?, 15),
            Value::String(v) => render_string(v.get(idx)?.as_deref()),
            Value::Char(v) => {
                let c = *v.get(idx)?;
                if c == QUOTE {
                    format!("{}\\{}{}", QUOTE, c, QUOTE)
                } else {
                    format!("{}{}{}", QUOTE, c, QUOTE)
                }
            }
        };
        Some(text)
    }
}
