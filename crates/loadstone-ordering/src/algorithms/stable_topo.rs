//! Stable topological sort.
//!
//! Kahn's algorithm with the ready set keyed on load-time `original_index`,
//! so entries with no ordering constraint between them keep their original
//! relative order and repeated sorts converge to one fixed order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::domain::entities::{DependencyGraph, ModEntry};
use crate::domain::errors::OrderingError;

/// Produce a new ordering in which every dependency precedes its dependents.
///
/// The ready set is a min-heap on `original_index`; anchoring stability to
/// the load-time index rather than the pre-sort position keeps the result
/// independent of how many times the sort has already run.
///
/// Fails with [`OrderingError::CycleDetected`] listing the unplaced module
/// ids when the graph contains a cycle; the caller's sequence is untouched
/// in that case (all-or-nothing).
pub fn stable_topological_sort(
    entries: &[ModEntry],
    graph: &DependencyGraph,
) -> Result<Vec<ModEntry>, OrderingError> {
    let count = entries.len();

    let mut remaining: Vec<usize> = (0..count)
        .map(|position| graph.prerequisites_of(position).len())
        .collect();

    let mut ready: BinaryHeap<Reverse<(usize, usize)>> = BinaryHeap::new();
    for position in 0..count {
        if remaining[position] == 0 {
            ready.push(Reverse((entries[position].original_index, position)));
        }
    }

    let mut placed: Vec<usize> = Vec::with_capacity(count);
    let mut is_placed = vec![false; count];

    while let Some(Reverse((_, position))) = ready.pop() {
        placed.push(position);
        is_placed[position] = true;

        for &dependent in graph.dependents_of(position) {
            remaining[dependent] -= 1;
            if remaining[dependent] == 0 {
                ready.push(Reverse((entries[dependent].original_index, dependent)));
            }
        }
    }

    if placed.len() < count {
        let unplaced = (0..count)
            .filter(|position| !is_placed[*position])
            .map(|position| entries[position].id().clone())
            .collect();
        return Err(OrderingError::CycleDetected {
            remaining: unplaced,
        });
    }

    Ok(placed
        .into_iter()
        .map(|position| entries[position].clone())
        .collect())
}
