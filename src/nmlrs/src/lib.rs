// nmlrs/src/lib.rs

//! Reading, binding and printing of `&group ... &end` namelist input decks.
//!
//! This library provides functionality to:
//! - Pull complete namelist blocks off a text stream, skipping comments
//! - Parse a block into its group name and `name[subs] = values` assignments
//! - Bind parsed assignments onto a declared schema of typed, optionally
//!   multi-dimensional items, with repeat counts and sticky defaults
//! - Print a bound schema back out, optionally hiding defaults or compacting
//!   the layout
//!
//! # Examples
//!
//! ```
//! use nmlrs::{Item, NamelistSchema, Options};
//!
//! fn main() -> Result<(), nmlrs::NamelistError> {
//!     let mut schema = NamelistSchema::new("cfg")
//!         .with_item(Item::scalar("threads", 1i64)?)?
//!         .with_item(Item::new("weights", &[4], 0.0f64)?)?;
//!
//!     let parsed = nmlrs::scan_namelist("&cfg threads = 8, weights = 3*0.5, 1.0 &end")?;
//!     nmlrs::process_namelist_with(&mut schema, &parsed, &Options::default())?;
//!     assert_eq!(schema.get_long("threads"), Some(8));
//!
//!     let mut out = Vec::new();
//!     nmlrs::write_to_writer(&schema, &mut out, &Options::default())?;
//!     Ok(())
//! }
//! ```

pub mod binder;
pub mod error;
pub mod index;
pub mod namelist;
pub mod options;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod values;

use std::fs::File;
use std::io::{BufReader, Cursor, Write};
use std::path::Path;

pub use binder::{
    process_namelist, process_namelist_with, process_namelists, process_namelists_with,
    process_stream,
};
pub use error::{status_of, ErrorCode, NamelistError, Result, NAMELIST_ERROR, NAMELIST_OK};
pub use namelist::{
    show_fields, show_namelist, show_schemas_fields, Entity, Item, NamelistSchema,
    ParsedNamelist,
};
pub use options::{
    set_namelist_processing_flags, set_print_namelist_flags, Options, PRINT_NAMELIST_COMPACT,
    PRINT_NAMELIST_NODEFAULTS, STICKY_NAMELIST_DEFAULTS,
};
pub use parser::{extract_subscripts, scan_namelist};
pub use printer::{print_namelist, print_namelist_to_string, print_namelist_with};
pub use scanner::{NamelistReader, DEFAULT_BLOCK_CAPACITY};
pub use values::{ItemType, Value};

/// Parse every namelist block of a file.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), nmlrs::NamelistError> {
///     for block in nmlrs::read("run.nml")? {
///         println!("{}", block);
///     }
///     Ok(())
/// }
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<ParsedNamelist>> {
    let file = File::open(path)?;
    parse_all(NamelistReader::new(BufReader::new(file)))
}

/// Parse every namelist block of a string.
///
/// # Examples
///
/// ```
/// fn main() -> Result<(), nmlrs::NamelistError> {
///     let blocks = nmlrs::reads("&a x = 1 &end\n&b y = 2 &end\n")?;
///     assert_eq!(blocks.len(), 2);
///     assert_eq!(blocks[1].group_name(), "b");
///     Ok(())
/// }
/// ```
pub fn reads(content: &str) -> Result<Vec<ParsedNamelist>> {
    parse_all(NamelistReader::new(Cursor::new(content)))
}

/// Parse every block a reader yields.
pub fn parse_all<R: std::io::BufRead>(reader: NamelistReader<R>) -> Result<Vec<ParsedNamelist>> {
    reader
        .map(|block| block.and_then(|text| scan_namelist(&text)))
        .collect()
}

/// Print a schema to a file, replacing any existing content.
pub fn write<P: AsRef<Path>>(schema: &NamelistSchema, path: P, options: &Options) -> Result<()> {
    let mut file = File::create(path)?;
    write_to_writer(schema, &mut file, options)
}

/// Print a schema to any writer implementing the Write trait.
pub fn write_to_writer<W: Write>(
    schema: &NamelistSchema,
    writer: &mut W,
    options: &Options,
) -> Result<()> {
    print_namelist_with(writer, schema, options)
}

#[cfg(feature = "json")]
/// Convert parsed blocks to a JSON string.
pub fn to_json(blocks: &[ParsedNamelist]) -> Result<String> {
    serde_json::to_string_pretty(blocks).map_err(NamelistError::from)
}

#[cfg(feature = "json")]
/// Convert a schema, with its current and default values, to a JSON string.
pub fn schema_to_json(schema: &NamelistSchema) -> Result<String> {
    serde_json::to_string_pretty(schema).map_err(NamelistError::from)
}

#[cfg(feature = "yaml")]
/// Convert parsed blocks to a YAML string.
pub fn to_yaml(blocks: &[ParsedNamelist]) -> Result<String> {
    serde_yaml::to_string(blocks).map_err(NamelistError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_simple() {
        let blocks = reads("&cfg threads = 8, label = \"a b\" &end").unwrap();
        assert_eq!(blocks.len(), 1);
        let entity = blocks[0].entity("label").unwrap();
        assert_eq!(entity.values(), &["a b".to_string()]);
    }

    #[test]
    fn test_reads_quoted_comment_marker_on_next_line() {
        let blocks = reads("&cfg label = \"first line\n! second\" &end\n").unwrap();
        assert_eq!(blocks.len(), 1);
        let entity = blocks[0].entity("label").unwrap();
        assert_eq!(entity.values(), &["first line ! second".to_string()]);
    }

    #[test]
    fn test_reads_reports_first_error() {
        assert!(matches!(
            reads("&a x = 1 &end\n&b y = \"open &end\n"),
            Err(NamelistError::UnbalancedQuotes { .. }) | Err(NamelistError::UnterminatedBlock { .. })
        ));
    }

    #[test]
    fn test_write_to_writer() {
        let schema = NamelistSchema::new("cfg")
            .with_item(Item::scalar("threads", 1i64).unwrap())
            .unwrap();
        let mut out = Vec::new();
        write_to_writer(&schema, &mut out, &Options::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "&cfg\n    threads = 1,\n&end\n");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_roundtrip() {
        let blocks = reads("&cfg w = 2*0.5 &end").unwrap();
        let json = to_json(&blocks).unwrap();
        let back: Vec<ParsedNamelist> = serde_json::from_str(&json).unwrap();
        assert_eq!(blocks, back);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_output() {
        let blocks = reads("&cfg w = 2*0.5 &end").unwrap();
        let yaml = to_yaml(&blocks).unwrap();
        assert!(yaml.contains("group_name: cfg"));
    }
}
