// nmlrs/src/parser.rs

//! Turn the text of one namelist block into a [`ParsedNamelist`].
//!
//! The block has the shape `&group name[subs] = v, N*v, ... &end`. An
//! assignment starts at the identifier directly in front of an unquoted `=`
//! and its value list runs up to the identifier of the next assignment.
//! Values are split at unquoted commas; a value of the form `N*literal`
//! fills `N` consecutive slots.

use crate::error::{NamelistError, Result};
use crate::namelist::{Entity, ParsedNamelist};
use crate::scanner::quoting::{
    has_balanced_quotes, next_unquoted, un_quote, unquoted_positions, QUOTE,
};
use crate::scanner::reader::is_block_end_at;

/// Parse a complete block, from the opening `&` through `&end`.
pub fn scan_namelist(block: &str) -> Result<ParsedNamelist> {
    let text = block.trim();
    let after = text
        .strip_prefix('&')
        .ok_or_else(|| NamelistError::improper("namelist must start with '&'"))?;

    let name_end = after
        .find(|c: char| c.is_whitespace() || c == '&')
        .unwrap_or(after.len());
    let group = &after[..name_end];
    if group.is_empty() || !group.chars().all(is_name_char) {
        return Err(NamelistError::improper(format!(
            "invalid namelist group name '{}'",
            group
        )));
    }

    let rest = &after[name_end..];
    if !has_balanced_quotes(rest, QUOTE) {
        return Err(NamelistError::UnbalancedQuotes {
            group: group.to_string(),
        });
    }

    let end = unquoted_positions(rest, '&', QUOTE)
        .into_iter()
        .find(|&pos| is_block_end_at(rest, pos))
        .ok_or_else(|| NamelistError::UnterminatedBlock {
            group: group.to_string(),
        })?;
    let trailing = rest[end + "&end".len()..].trim();
    if !trailing.is_empty() {
        return Err(NamelistError::improper(format!(
            "unexpected text '{}' after &end of namelist '{}'",
            trailing, group
        )));
    }

    let mut namelist = ParsedNamelist::new(group);
    parse_body(&mut namelist, &rest[..end])?;
    log::debug!(
        "parsed namelist '{}' with {} entities",
        namelist.group_name(),
        namelist.len()
    );
    Ok(namelist)
}

fn parse_body(namelist: &mut ParsedNamelist, body: &str) -> Result<()> {
    let group = namelist.group_name().to_string();
    let assigns = assignment_positions(body);

    // (name start, '=' position) for every assignment
    let mut spans = Vec::with_capacity(assigns.len());
    let mut floor = 0;
    for &eq in &assigns {
        spans.push((name_start(body, floor, eq), eq));
        floor = eq + 1;
    }

    let preamble_end = spans.first().map_or(body.len(), |&(start, _)| start);
    let preamble = body[..preamble_end].trim_matches(|c: char| c.is_whitespace() || c == ',');
    if !preamble.is_empty() {
        return Err(NamelistError::MissingAssignment {
            group,
            text: preamble.to_string(),
        });
    }

    for (k, &(start, eq)) in spans.iter().enumerate() {
        let name_token = body[start..eq].trim();
        if name_token.is_empty() {
            return Err(NamelistError::InvalidName {
                group,
                name: name_token.to_string(),
            });
        }
        let (name, subscripts) = extract_subscripts(name_token)?;
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(NamelistError::InvalidName { group, name });
        }

        let values_end = spans.get(k + 1).map_or(body.len(), |&(next, _)| next);
        let mut entity = Entity::new(name).with_subscripts(subscripts);
        parse_values(&mut entity, &body[eq + 1..values_end])?;
        namelist.push(entity);
    }
    Ok(())
}

/// Unquoted `=` signs outside subscript brackets.
fn assignment_positions(body: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut in_quotes = false;
    let mut depth = 0usize;
    let mut prev = None;
    for (i, c) in body.char_indices() {
        if c == QUOTE && prev != Some('\\') {
            in_quotes = !in_quotes;
        } else if !in_quotes {
            match c {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '=' if depth == 0 => positions.push(i),
                _ => {}
            }
        }
        prev = Some(c);
    }
    positions
}

/// Walk back from an `=` over blanks, bracket groups and the identifier,
/// never past `floor`.
fn name_start(body: &str, floor: usize, eq: usize) -> usize {
    let head = body[floor..eq].trim_end();
    let mut start = head.len();

    while head[..start].ends_with(']') {
        match head[..start].rfind('[') {
            Some(open) => start = open,
            None => break,
        }
    }
    while let Some(c) = head[..start].chars().next_back() {
        if !is_name_char(c) {
            break;
        }
        start -= c.len_utf8();
    }
    floor + start
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn parse_values(entity: &mut Entity, text: &str) -> Result<()> {
    let mut start = 0;
    let mut cuts = unquoted_positions(text, ',', QUOTE);
    cuts.push(text.len());
    for cut in cuts {
        let token = text[start..cut].trim();
        start = cut + 1;
        if token.is_empty() {
            continue;
        }
        let (repeat, literal) = split_repeat(entity.name(), token)?;
        let mut literal = literal.to_string();
        un_quote(&mut literal);
        entity.push_value(literal, repeat);
    }
    Ok(())
}

/// Split an optional `N*` prefix off a value token.
///
/// A prefix is only a repeat when it starts with a digit or a sign followed
/// by a digit; such a prefix must then be a positive integer.
fn split_repeat<'a>(name: &str, token: &'a str) -> Result<(usize, &'a str)> {
    if token.starts_with(QUOTE) {
        return Ok((1, token));
    }
    let Some(star) = next_unquoted(token, '*', QUOTE) else {
        return Ok((1, token));
    };
    let prefix = token[..star].trim();
    let unsigned = prefix.strip_prefix(['+', '-']).unwrap_or(prefix);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok((1, token));
    }
    match prefix.parse::<usize>() {
        Ok(count) if count > 0 => Ok((count, token[star + 1..].trim())),
        _ => Err(NamelistError::invalid_repeat(name, token)),
    }
}

/// Split a name token such as `matrix[1][2]` or `matrix[1,2]` into the bare
/// name and its subscripts.
pub fn extract_subscripts(name: &str) -> Result<(String, Vec<usize>)> {
    let Some(open) = name.find('[') else {
        if name.contains(']') {
            return Err(NamelistError::invalid_subscript(name, "]"));
        }
        return Ok((name.trim().to_string(), Vec::new()));
    };

    let base = name[..open].trim().to_string();
    let mut subscripts = Vec::new();
    let mut rest = name[open..].trim_start();
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(NamelistError::invalid_subscript(name, rest));
        }
        let close = rest
            .find(']')
            .ok_or_else(|| NamelistError::invalid_subscript(name, rest))?;
        for part in rest[1..close].split(',') {
            let part = part.trim();
            let index = part
                .parse::<usize>()
                .map_err(|_| NamelistError::invalid_subscript(name, part))?;
            subscripts.push(index);
        }
        rest = rest[close + 1..].trim_start();
    }
    Ok((base, subscripts))
}
