// nmlrs/src/scanner/reader.rs

//! Pull complete namelist blocks off a character stream.
//!
//! A block runs from an `&` that starts a token through the first unquoted
//! `&end`. Blank lines and full-line comments (`!` or `#` as the first
//! non-blank character) before a block are skipped, inline `!` comments are
//! stripped, and line breaks inside a block become single spaces. Text that
//! follows `&end` on the same line is kept for the next block.

use super::quoting::{is_quoted, next_unquoted_from, unquoted_positions, QUOTE};
use crate::error::{NamelistError, Result};
use std::io::BufRead;

/// Default capacity of a single block, in bytes.
pub const DEFAULT_BLOCK_CAPACITY: usize = 16384;

const BLOCK_END: &str = "&end";

/// Streaming reader yielding one namelist block at a time.
pub struct NamelistReader<R> {
    input: R,
    capacity: usize,
    pending: Option<String>,
    line: usize,
}

impl<R: BufRead> NamelistReader<R> {
    /// Create a new reader with the default block capacity.
    pub fn new(input: R) -> Self {
        Self {
            input,
            capacity: DEFAULT_BLOCK_CAPACITY,
            pending: None,
            line: 0,
        }
    }

    /// Set the maximum size of a single block.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// The block capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of input lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next complete block.
    ///
    /// Returns `Ok(None)` once the input holds no further block.
    pub fn next_block(&mut self) -> Result<Option<String>> {
        let mut block = String::new();
        let mut in_block = false;

        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                None if in_block => {
                    return Err(NamelistError::UnterminatedBlock {
                        group: group_name_of(&block).to_string(),
                    });
                }
                None => return Ok(None),
            };

            // A quoted value may run on from the previous line.
            let continues_quote = in_block && is_quoted(&block, block.len(), QUOTE);
            let trimmed = line.trim_start();
            if !continues_quote
                && (trimmed.starts_with('#') || (!in_block && trimmed.starts_with('!')))
            {
                continue;
            }
            let text = strip_inline_comment(&line, continues_quote);

            let body = if in_block {
                text
            } else {
                match find_block_start(text) {
                    Some(start) => {
                        in_block = true;
                        &text[start..]
                    }
                    None => {
                        if !text.trim().is_empty() {
                            log::warn!("line {}: ignoring text outside a namelist block", self.line);
                        }
                        continue;
                    }
                }
            };

            if !block.is_empty() {
                block.push(' ');
            }
            block.push_str(body);

            if let Some(end) = find_block_end(&block) {
                let stop = end + BLOCK_END.len();
                let rest = block[stop..].trim();
                if !rest.is_empty() {
                    self.pending = Some(rest.to_string());
                }
                block.truncate(stop);
                self.check_capacity(&block)?;
                log::debug!(
                    "read namelist block '{}' ({} bytes) ending at line {}",
                    group_name_of(&block),
                    block.len(),
                    self.line
                );
                return Ok(Some(block));
            }
            self.check_capacity(&block)?;
        }
    }

    fn check_capacity(&self, block: &str) -> Result<()> {
        if block.len() > self.capacity {
            return Err(NamelistError::BufferTooSmall {
                capacity: self.capacity,
                required: block.len(),
            });
        }
        Ok(())
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(pending) = self.pending.take() {
            return Ok(Some(pending));
        }
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }
}

impl<R: BufRead> Iterator for NamelistReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}

/// Read every block from `input` with the given per-block capacity.
pub fn read_blocks<R: BufRead>(input: R, capacity: usize) -> Result<Vec<String>> {
    NamelistReader::new(input).with_capacity(capacity).collect()
}

/// Drop an unquoted `!` and everything after it.
fn strip_inline_comment(line: &str, starts_quoted: bool) -> &str {
    match next_unquoted_from(line, '!', QUOTE, starts_quoted) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Byte offset of the `&` opening a block, skipping stray `&end` markers.
fn find_block_start(text: &str) -> Option<usize> {
    unquoted_positions(text, '&', QUOTE).into_iter().find(|&pos| {
        starts_token(text, pos) && !is_block_end_at(text, pos)
    })
}

/// Byte offset of the first unquoted `&end` after the opening `&`.
fn find_block_end(block: &str) -> Option<usize> {
    unquoted_positions(block, '&', QUOTE)
        .into_iter()
        .find(|&pos| pos > 0 && is_block_end_at(block, pos))
}

fn starts_token(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .map_or(true, |c| c.is_whitespace() || c == ',')
}

pub(crate) fn is_block_end_at(text: &str, pos: usize) -> bool {
    text[pos..].starts_with(BLOCK_END)
        && text[pos + BLOCK_END.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
}

/// The identifier following the opening `&` of a block.
pub(crate) fn group_name_of(block: &str) -> &str {
    let after = block.trim_start().trim_start_matches('&');
    let end = after
        .find(|c: char| c.is_whitespace() || c == '&')
        .unwrap_or(after.len());
    &after[..end]
}
