// nmlrs/src/namelist/schema.rs

//! Declared namelist groups: named, typed items with defaults.
//!
//! Each item holds its live storage and its declared default side by side.
//! Binding writes the live storage, resetting copies the default over it,
//! and the printer compares the two to suppress unchanged scalars.

use crate::error::{NamelistError, Result};
use crate::index::slot_count;
use crate::values::{ItemType, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// One declared variable of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    dimensions: Vec<usize>,
    value: Value,
    default: Value,
}

impl Item {
    /// Declare an item with the given dimensions and default.
    ///
    /// A single-slot default is repeated over every slot of an array item;
    /// otherwise the default must hold exactly one value per slot.
    pub fn new<S, V>(name: S, dimensions: &[usize], default: V) -> Result<Self>
    where
        S: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        if dimensions.contains(&0) {
            return Err(NamelistError::improper(format!(
                "item '{}' declares a zero dimension",
                name
            )));
        }
        let default = default.into();
        let expected = slot_count(dimensions);
        let default = default
            .broadcast(expected)
            .ok_or_else(|| NamelistError::DimensionMismatch {
                item: name.clone(),
                expected,
                actual: default.len(),
            })?;
        Ok(Self {
            name,
            dimensions: dimensions.to_vec(),
            value: default.clone(),
            default,
        })
    }

    /// Declare a scalar item.
    pub fn scalar<S, V>(name: S, default: V) -> Result<Self>
    where
        S: Into<String>,
        V: Into<Value>,
    {
        Self::new(name, &[], default)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_type(&self) -> ItemType {
        self.value.item_type()
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// Number of subscripts the item takes.
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Number of scalar slots.
    pub fn slot_count(&self) -> usize {
        self.value.len()
    }

    /// Current storage.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Mutable access to the current storage.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Declared default.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Overwrite the storage with the declared default.
    pub fn reset(&mut self) {
        self.value.clone_from(&self.default);
    }

    /// Whether slot `idx` still holds its default.
    pub fn slot_is_default(&self, idx: usize) -> bool {
        self.value.slot_eq(&self.default, idx)
    }

    /// Whether every slot holds its default.
    pub fn is_default(&self) -> bool {
        (0..self.slot_count()).all(|idx| self.slot_is_default(idx))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for dim in &self.dimensions {
            write!(f, "[{}]", dim)?;
        }
        write!(f, ": {} =", self.item_type())?;
        for idx in 0..self.default.len() {
            if let Some(text) = self.default.render_slot(idx) {
                let sep = if idx == 0 { " " } else { ", " };
                write!(f, "{}{}", sep, text)?;
            }
        }
        Ok(())
    }
}

/// A named group of items. Item names are unique and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamelistSchema {
    name: String,
    items: Vec<Item>,
}

impl NamelistSchema {
    /// Create a new schema with no items.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Append an item, rejecting a duplicate name.
    pub fn add_item(&mut self, item: Item) -> Result<&mut Self> {
        if self.item(item.name()).is_some() {
            return Err(NamelistError::Duplicate {
                group: self.name.clone(),
                item: item.name,
            });
        }
        self.items.push(item);
        Ok(self)
    }

    /// Builder-style [`NamelistSchema::add_item`].
    pub fn with_item(mut self, item: Item) -> Result<Self> {
        self.add_item(item)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items in declaration order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy every item's default over its storage.
    pub fn reset_namelist_values(&mut self) {
        log::debug!("resetting namelist '{}' to defaults", self.name);
        for item in &mut self.items {
            item.reset();
        }
    }

    pub fn get_short(&self, name: &str) -> Option<i16> {
        self.item(name)?.value().as_short()?.first().copied()
    }

    /// First slot of an `Int32Native` or `Int32Fixed` item.
    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.item(name)?.value().as_int()?.first().copied()
    }

    pub fn get_long(&self, name: &str) -> Option<i64> {
        self.item(name)?.value().as_long()?.first().copied()
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.item(name)?.value().as_float()?.first().copied()
    }

    pub fn get_double(&self, name: &str) -> Option<f64> {
        self.item(name)?.value().as_double()?.first().copied()
    }

    /// First slot of a string item; `None` also for the null string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.item(name)?.value().as_strings()?.first()?.as_deref()
    }

    pub fn get_char(&self, name: &str) -> Option<char> {
        self.item(name)?.value().as_chars()?.first().copied()
    }
}

/// Write a listing of a schema's items with their types and defaults.
pub fn show_fields<W: Write>(writer: &mut W, schema: &NamelistSchema) -> Result<()> {
    writeln!(writer, "&{}", schema.name())?;
    for item in schema.items() {
        writeln!(writer, "    {}", item)?;
    }
    writeln!(writer, "&end")?;
    Ok(())
}

/// [`show_fields`] for several schemas, separated by blank lines.
pub fn show_schemas_fields<W: Write>(writer: &mut W, schemas: &[NamelistSchema]) -> Result<()> {
    for (k, schema) in schemas.iter().enumerate() {
        if k > 0 {
            writeln!(writer)?;
        }
        show_fields(writer, schema)?;
    }
    writer.flush()?;
    Ok(())
}
