// nmlrs/src/printer.rs

//! Write bound schemas back out as namelist text.
//!
//! Output opens with `&name` on its own line. Each printed item starts with
//! `name[0]... = ` (indented four spaces, or one space in compact layout)
//! and every value is followed by a comma and a separator: a space, or a
//! newline after an item's last value unless the layout is compact. A value
//! that would run past the column width starts a continuation line. When
//! every item is suppressed the block collapses to `&name &end`.

use crate::error::Result;
use crate::namelist::{Item, NamelistSchema};
use crate::options::Options;
use std::io::Write;

const INDENT: &str = "    ";
const CONTINUATION: &str = "\n        ";
const CONTINUATION_COLUMN: usize = 9;
const COMPACT_CONTINUATION: &str = "\n ";
const COMPACT_CONTINUATION_COLUMN: usize = 2;

/// Print `schema` using the calling thread's flags.
pub fn print_namelist<W: Write>(writer: &mut W, schema: &NamelistSchema) -> Result<()> {
    print_namelist_with(writer, schema, &Options::current())
}

/// Print `schema` with explicit options.
///
/// Under `no_defaults`, scalar items equal to their default are skipped.
/// Array items are always printed in full.
pub fn print_namelist_with<W: Write>(
    writer: &mut W,
    schema: &NamelistSchema,
    options: &Options,
) -> Result<()> {
    let mut printer = Printer::new(writer, options);
    for item in schema.items() {
        let n_values = item.slot_count();
        let mut first_value = true;
        for idx in 0..n_values {
            if options.no_defaults && n_values == 1 && item.slot_is_default(idx) {
                continue;
            }
            let Some(text) = item.value().render_slot(idx) else {
                continue;
            };
            printer.tags(schema.name(), item, &mut first_value)?;
            let separator = if idx + 1 == n_values && !options.compact {
                '\n'
            } else {
                ' '
            };
            printer.output(&format!("{},{}", text, separator))?;
        }
    }
    printer.finish(schema.name())
}

/// Render `schema` into a string.
pub fn print_namelist_to_string(schema: &NamelistSchema, options: &Options) -> Result<String> {
    let mut buf = Vec::new();
    print_namelist_with(&mut buf, schema, options)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

struct Printer<'a, W> {
    writer: &'a mut W,
    options: &'a Options,
    column: usize,
    first_item: bool,
}

impl<'a, W: Write> Printer<'a, W> {
    fn new(writer: &'a mut W, options: &'a Options) -> Self {
        Self {
            writer,
            options,
            column: 0,
            first_item: true,
        }
    }

    /// Open the block on first use and write an item's `name = ` once.
    fn tags(&mut self, group: &str, item: &Item, first_value: &mut bool) -> Result<()> {
        if self.first_item {
            writeln!(self.writer, "&{}", group)?;
            self.first_item = false;
        }
        if !*first_value {
            return Ok(());
        }

        let mut tag = if self.options.compact {
            if item.name().len() + 3 + self.column > self.options.column_width {
                self.writer.write_all(COMPACT_CONTINUATION.as_bytes())?;
                self.column = COMPACT_CONTINUATION_COLUMN;
            }
            format!(" {}", item.name())
        } else {
            self.column = 0;
            format!("{}{}", INDENT, item.name())
        };
        for _ in 0..item.rank() {
            tag.push_str("[0]");
        }
        tag.push_str(" = ");
        self.column += tag.len();
        self.writer.write_all(tag.as_bytes())?;
        *first_value = false;
        Ok(())
    }

    /// Write one `value,sep` token, wrapping first if it would overflow.
    fn output(&mut self, token: &str) -> Result<()> {
        if token.len() + self.column > self.options.column_width {
            if self.options.compact {
                self.writer.write_all(COMPACT_CONTINUATION.as_bytes())?;
                self.column = COMPACT_CONTINUATION_COLUMN;
            } else {
                self.writer.write_all(CONTINUATION.as_bytes())?;
                self.column = CONTINUATION_COLUMN;
            }
        }
        self.writer.write_all(token.as_bytes())?;
        self.column += token.len();
        Ok(())
    }

    fn finish(self, group: &str) -> Result<()> {
        if self.first_item {
            writeln!(self.writer, "&{} &end", group)?;
        } else {
            writeln!(self.writer, "&end")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
