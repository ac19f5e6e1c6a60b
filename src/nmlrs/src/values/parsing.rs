// nmlrs/src/values/parsing.rs

//! Decode literal tokens into scalar slot values.
//!
//! Literals reach these functions with their quote marks already stripped.

use super::value::ItemType;
use crate::error::{NamelistError, Result};
use crate::scanner::quoting::NULL_STRING;
use std::str::FromStr;

/// Parse a base-10 integer literal. Out-of-range values are rejected.
pub fn parse_integer<T: FromStr>(item: &str, literal: &str, item_type: ItemType) -> Result<T> {
    literal
        .trim()
        .parse::<T>()
        .map_err(|_| NamelistError::invalid_value(item, literal, item_type.type_name()))
}

/// Parse a decimal or scientific literal.
///
/// A `d`/`D` exponent marker is accepted as a synonym for `e`, as are
/// `inf`, `infinity` and `nan` in any case.
pub fn parse_float<T: FromStr>(item: &str, literal: &str, item_type: ItemType) -> Result<T> {
    let trimmed = literal.trim();
    let normalized = match trimmed.find(['d', 'D']) {
        Some(pos) if trimmed[..pos].ends_with(|c: char| c.is_ascii_digit() || c == '.') => {
            format!("{}e{}", &trimmed[..pos], &trimmed[pos + 1..])
        }
        _ => trimmed.to_string(),
    };
    normalized
        .parse::<T>()
        .map_err(|_| NamelistError::invalid_value(item, literal, item_type.type_name()))
}

/// Take a string literal verbatim. The literal `{NULL}` is the null string.
pub fn parse_string(literal: &str) -> Option<String> {
    if literal == NULL_STRING {
        None
    } else {
        Some(literal.to_string())
    }
}

/// A char literal must hold exactly one character.
pub fn parse_char(item: &str, literal: &str) -> Result<char> {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(NamelistError::invalid_value(
            item,
            literal,
            ItemType::Char.type_name(),
        )),
    }
}
