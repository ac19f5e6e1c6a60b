// nmlrs/src/values/mod.rs

//! Typed storage for schema items and the literal codecs that fill it.

pub mod conversion;
pub mod formatting;
pub mod parsing;
pub mod value;

#[cfg(test)]
mod tests;

pub use formatting::format_exponential;
pub use parsing::{parse_char, parse_float, parse_integer, parse_string};
pub use value::{ItemType, Value};
