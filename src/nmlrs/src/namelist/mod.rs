// nmlrs/src/namelist/mod.rs

//! Namelist data structures.
//!
//! [`text`] holds the untyped result of parsing a block; [`schema`] holds
//! the declared, typed groups that parsed blocks are bound onto.

pub mod schema;
pub mod text;

pub use schema::{show_fields, show_schemas_fields, Item, NamelistSchema};
pub use text::{show_namelist, Entity, ParsedNamelist};
