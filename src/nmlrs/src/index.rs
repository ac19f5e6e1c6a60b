// nmlrs/src/index.rs

//! Row-major slot indexing for multi-dimensional items.
//!
//! Subscripts are zero-based. The last dimension varies fastest, so item
//! `m[2][3]` stores `m[0][0], m[0][1], m[0][2], m[1][0], ...`.

use crate::error::{NamelistError, Result};

/// Number of scalar slots of an item with the given dimensions.
///
/// A scalar (no dimensions) has one slot.
pub fn slot_count(dimensions: &[usize]) -> usize {
    dimensions.iter().product()
}

/// Linear slot index addressed by `subscripts` within an item.
///
/// Subscripts address the leading dimensions; missing trailing subscripts
/// are taken as zero, so `m[1]` on `m[2][3]` addresses the start of row 1
/// and no subscripts at all address slot 0. More subscripts than dimensions,
/// or a subscript not below its dimension, is an error.
pub fn slot_index(item: &str, dimensions: &[usize], subscripts: &[usize]) -> Result<usize> {
    if subscripts.len() > dimensions.len() {
        return Err(NamelistError::SubscriptCount {
            item: item.to_string(),
            expected: dimensions.len(),
            actual: subscripts.len(),
        });
    }

    let mut linear = 0;
    for (axis, &dimension) in dimensions.iter().enumerate() {
        let subscript = subscripts.get(axis).copied().unwrap_or(0);
        if subscript >= dimension {
            return Err(NamelistError::SubscriptOutOfRange {
                item: item.to_string(),
                axis,
                subscript,
                dimension,
            });
        }
        linear = linear * dimension + subscript;
    }
    Ok(linear)
}

/// Subscripts addressing linear slot `index`; the inverse of [`slot_index`].
pub fn subscripts_of(index: usize, dimensions: &[usize]) -> Vec<usize> {
    let mut subscripts = vec![0; dimensions.len()];
    let mut remaining = index;
    for (axis, &dimension) in dimensions.iter().enumerate().rev() {
        if dimension == 0 {
            continue;
        }
        subscripts[axis] = remaining % dimension;
        remaining /= dimension;
    }
    subscripts
}
