//! Paragraph grouping for the narrative line stream.
//!
//! Two passes over the ordered line ids:
//! 1. Resolve each id to its record and collect the indices of delimiter
//!    lines (empty lines with a non-none break level).
//! 2. Split the id sequence at those indices, with each split placed at the
//!    start of the new segment.
//!
//! Grouping is a pure function of the line records, so recomputing it on
//! every draw always reproduces the same partition. The break set is passed
//! around explicitly rather than living in shared state.

use std::collections::BTreeSet;

use crate::story::{LineId, LineRecord};

/// Indices in `ids` whose resolved record is a delimiter line.
///
/// Ids that resolve to nothing contribute no break.
pub fn break_indices<'a, F>(ids: &[LineId], lookup: F) -> BTreeSet<usize>
where
    F: Fn(&LineId) -> Option<&'a LineRecord>,
{
    ids.iter()
        .enumerate()
        .filter(|(_, id)| lookup(id).is_some_and(|line| line.is_delimiter()))
        .map(|(i, _)| i)
        .collect()
}

/// Partition `ids` at the given indices.
///
/// Each split lands at the start of the new segment: the group before the
/// first break index may be empty (break at index 0), and every break index
/// starts its own group. With no breaks the whole sequence is one group.
pub fn split_at_breaks<'a>(ids: &'a [LineId], breaks: &BTreeSet<usize>) -> Vec<&'a [LineId]> {
    let mut groups = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for &brk in breaks {
        if brk >= ids.len() {
            break;
        }
        groups.push(&ids[start..brk]);
        start = brk;
    }
    groups.push(&ids[start..]);
    groups
}

/// Both passes composed: resolve records, find breaks, split.
pub fn paragraph_groups<'a, 'b, F>(ids: &'a [LineId], lookup: F) -> Vec<&'a [LineId]>
where
    F: Fn(&LineId) -> Option<&'b LineRecord>,
{
    let breaks = break_indices(ids, lookup);
    split_at_breaks(ids, &breaks)
}
