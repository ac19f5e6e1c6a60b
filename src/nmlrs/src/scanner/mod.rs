// nmlrs/src/scanner/mod.rs

//! Character-level scanning: quoting-aware search and block reading.

pub mod quoting;
pub mod reader;

pub use reader::{read_blocks, NamelistReader, DEFAULT_BLOCK_CAPACITY};
