// nmlrs/src/namelist/text.rs

//! Untyped, textual result of parsing one namelist block.

use crate::error::Result;
use crate::scanner::quoting::{needs_quotes, render_string, QUOTE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// One `name[subs] = values` assignment of a parsed block.
///
/// `values` and `repeats` are parallel: the literal `values[k]` fills
/// `repeats[k]` consecutive slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    subscripts: Vec<usize>,
    values: Vec<String>,
    repeats: Vec<usize>,
}

impl Entity {
    /// Create a new entity with no subscripts and no values.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the bracketed subscripts.
    pub fn with_subscripts(mut self, subscripts: Vec<usize>) -> Self {
        self.subscripts = subscripts;
        self
    }

    /// Append a value with a repeat count. A zero repeat is stored as one.
    pub fn push_value<S: Into<String>>(&mut self, value: S, repeat: usize) -> &mut Self {
        self.values.push(value.into());
        self.repeats.push(repeat.max(1));
        self
    }

    /// Builder-style [`Entity::push_value`].
    pub fn with_value<S: Into<String>>(mut self, value: S, repeat: usize) -> Self {
        self.push_value(value, repeat);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscripts(&self) -> &[usize] {
        &self.subscripts
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn repeats(&self) -> &[usize] {
        &self.repeats
    }

    /// Iterate over `(literal, repeat)` pairs.
    pub fn iter_values(&self) -> impl Iterator<Item = (&str, usize)> {
        self.values
            .iter()
            .map(String::as_str)
            .zip(self.repeats.iter().copied())
    }

    /// Number of scalar slots this entity supplies, saturating at `usize::MAX`.
    pub fn slot_count(&self) -> usize {
        self.repeats
            .iter()
            .fold(0usize, |total, &repeat| total.saturating_add(repeat))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for sub in &self.subscripts {
            write!(f, "[{}]", sub)?;
        }
        write!(f, " =")?;
        for (value, repeat) in self.iter_values() {
            if repeat > 1 {
                write!(f, " {}*{},", repeat, render_token(value))?;
            } else {
                write!(f, " {},", render_token(value))?;
            }
        }
        Ok(())
    }
}

/// A literal that would read back as a repeat prefix has to be quoted.
fn render_token(value: &str) -> String {
    if value.contains('*') && !needs_quotes(value) {
        format!("{}{}{}", QUOTE, value, QUOTE)
    } else {
        render_string(Some(value))
    }
}

/// A parsed namelist block: group name plus ordered entity assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedNamelist {
    group_name: String,
    entities: Vec<Entity>,
}

impl ParsedNamelist {
    /// Create a new empty block for `group_name`.
    pub fn new<S: Into<String>>(group_name: S) -> Self {
        Self {
            group_name: group_name.into(),
            entities: Vec::new(),
        }
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Append an entity.
    pub fn push(&mut self, entity: Entity) -> &mut Self {
        self.entities.push(entity);
        self
    }

    /// The last entity assigning `name`, if any.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().rev().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Reset to an empty, unnamed block, releasing all entities.
    pub fn clear(&mut self) {
        self.group_name.clear();
        self.entities.clear();
    }
}

impl fmt::Display for ParsedNamelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entities.is_empty() {
            return writeln!(f, "&{} &end", self.group_name);
        }
        writeln!(f, "&{}", self.group_name)?;
        for entity in &self.entities {
            writeln!(f, "    {}", entity)?;
        }
        writeln!(f, "&end")
    }
}

/// Write a parsed block in re-readable form.
pub fn show_namelist<W: Write>(writer: &mut W, namelist: &ParsedNamelist) -> Result<()> {
    write!(writer, "{}", namelist)?;
    writer.flush()?;
    Ok(())
}
