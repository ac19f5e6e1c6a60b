// nmlrs/src/binder.rs

//! Bind parsed namelist blocks onto declared schemas.
//!
//! Unless sticky defaults are requested, a schema is reset to its defaults
//! before a block is applied. Entities are then applied left to right: each
//! one is located by name, its subscripts select a starting slot, and its
//! values (expanded by their repeat counts) are decoded into consecutive
//! slots. A failed bind leaves the schema partially updated; reset it
//! before reuse.

use crate::error::{NamelistError, Result};
use crate::index::{slot_index, subscripts_of};
use crate::namelist::{Entity, Item, NamelistSchema, ParsedNamelist};
use crate::options::Options;
use crate::parser::scan_namelist;
use crate::scanner::NamelistReader;
use std::io::BufRead;

/// Bind `parsed` onto `schema` using the calling thread's flags.
pub fn process_namelist(schema: &mut NamelistSchema, parsed: &ParsedNamelist) -> Result<()> {
    process_namelist_with(schema, parsed, &Options::current())
}

/// Bind `parsed` onto `schema`.
///
/// The group name of `parsed` is not checked against the schema.
pub fn process_namelist_with(
    schema: &mut NamelistSchema,
    parsed: &ParsedNamelist,
    options: &Options,
) -> Result<()> {
    bind(schema, parsed, options).map_err(|err| {
        log::error!(
            "error binding namelist '{}' ({}): {}",
            parsed.group_name(),
            err.category(),
            err
        );
        err
    })
}

/// Bind `parsed` onto the schema named by its group, using the calling
/// thread's flags. Returns the index of the schema that was bound.
pub fn process_namelists(schemas: &mut [NamelistSchema], parsed: &ParsedNamelist) -> Result<usize> {
    process_namelists_with(schemas, parsed, &Options::current())
}

/// Bind `parsed` onto the schema named by its group.
pub fn process_namelists_with(
    schemas: &mut [NamelistSchema],
    parsed: &ParsedNamelist,
    options: &Options,
) -> Result<usize> {
    let Some(index) = schemas
        .iter()
        .position(|schema| schema.name() == parsed.group_name())
    else {
        let err = NamelistError::GroupNotFound {
            group: parsed.group_name().to_string(),
        };
        log::error!("{}", err);
        return Err(err);
    };
    log::debug!("selected schema {} for namelist '{}'", index, parsed.group_name());
    process_namelist_with(&mut schemas[index], parsed, options)?;
    Ok(index)
}

/// Read, parse and bind every block of a stream.
///
/// Each block is bound to the schema named by its group. Stops at the first
/// error; returns the number of blocks bound.
pub fn process_stream<R: BufRead>(
    reader: &mut NamelistReader<R>,
    schemas: &mut [NamelistSchema],
    options: &Options,
) -> Result<usize> {
    let mut bound = 0;
    while let Some(block) = reader.next_block().map_err(|err| {
        log::error!("error reading namelist near line {}: {}", reader.line(), err);
        err
    })? {
        let parsed = scan_namelist(&block).map_err(|err| {
            log::error!("error parsing namelist: {}", err);
            err
        })?;
        process_namelists_with(schemas, &parsed, options)?;
        bound += 1;
    }
    Ok(bound)
}

fn bind(schema: &mut NamelistSchema, parsed: &ParsedNamelist, options: &Options) -> Result<()> {
    if !options.sticky_defaults {
        schema.reset_namelist_values();
    }
    let group = schema.name().to_string();
    for entity in parsed.entities() {
        let item = schema
            .item_mut(entity.name())
            .ok_or_else(|| NamelistError::unknown_item(group.as_str(), entity.name()))?;
        bind_entity(item, entity)?;
    }
    Ok(())
}

fn bind_entity(item: &mut Item, entity: &Entity) -> Result<()> {
    let name = item.name().to_string();
    let offset = slot_index(&name, item.dimensions(), entity.subscripts())?;
    let supplied = entity.slot_count();
    let capacity = item.slot_count();
    if offset.checked_add(supplied).map_or(true, |end| end > capacity) {
        return Err(NamelistError::TooManyValues {
            item: name,
            offset,
            supplied,
            capacity,
        });
    }

    let value = item.value_mut();
    let mut slot = offset;
    for (literal, repeat) in entity.iter_values() {
        for _ in 0..repeat {
            value.assign(slot, literal, &name)?;
            slot += 1;
        }
    }
    log::trace!(
        "set {} slot(s) of '{}' from {:?}",
        supplied,
        name,
        subscripts_of(offset, item.dimensions())
    );
    Ok(())
}
