//! Checkable invariants over entry sequences and dependency graphs.
//!
//! Used by the test suites to assert that sorting and validation hold the
//! guarantees the rest of the system is built on.

use std::collections::HashSet;

use super::entities::{DependencyGraph, ModEntry};
use super::value_objects::ConflictKind;

/// Every edge is respected: the dependency is ordered before the dependent.
///
/// The graph must have been built from `entries` in their current order.
pub fn invariant_topological_order(graph: &DependencyGraph) -> bool {
    graph
        .edges()
        .iter()
        .all(|edge| edge.dependency < edge.dependent)
}

/// The graph is a DAG.
pub fn invariant_no_cycles(graph: &DependencyGraph) -> bool {
    let mut visited = HashSet::new();
    let mut stack = HashSet::new();

    for node in 0..graph.node_count() {
        if has_cycle_dfs(graph, node, &mut visited, &mut stack) {
            return false;
        }
    }

    true
}

fn has_cycle_dfs(
    graph: &DependencyGraph,
    node: usize,
    visited: &mut HashSet<usize>,
    stack: &mut HashSet<usize>,
) -> bool {
    if stack.contains(&node) {
        return true;
    }
    if visited.contains(&node) {
        return false;
    }

    visited.insert(node);
    stack.insert(node);

    for &prerequisite in graph.prerequisites_of(node) {
        if has_cycle_dfs(graph, prerequisite, visited, stack) {
            return true;
        }
    }

    stack.remove(&node);
    false
}

/// Every DependencyBelow conflict on A naming B has exactly one mirrored
/// DependedByAbove conflict on B naming A.
pub fn invariant_conflicts_mirrored(entries: &[ModEntry]) -> bool {
    for entry in entries {
        for conflict in &entry.conflicts {
            if conflict.kind != ConflictKind::DependencyBelow {
                continue;
            }
            let mirrors = entries
                .iter()
                .filter(|other| other.id() == &conflict.counterpart_id)
                .flat_map(|other| other.conflicts.iter())
                .filter(|other_conflict| {
                    other_conflict.kind == ConflictKind::DependedByAbove
                        && &other_conflict.counterpart_id == entry.id()
                })
                .count();
            if mirrors != 1 {
                return false;
            }
        }
    }
    true
}
