//! Dependency graph builder.
//!
//! Derives directed edges from declared module metadata and from inferred
//! compiled-unit references. Pure over one snapshot of the entry sequence;
//! absent data yields fewer edges, never an error.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::domain::entities::{DependencyGraph, ModEntry};
use crate::domain::value_objects::{EdgeKind, ModuleId};

/// Build the dependency graph for the given entry snapshot.
///
/// Edge direction is dependent → dependency: for every edge the dependency
/// must precede the dependent in the load order. Dangling declared ids are
/// recorded in the graph's unresolved map instead of becoming edges.
pub fn build_dependency_graph(entries: &[ModEntry]) -> DependencyGraph {
    let mut graph = DependencyGraph::new(entries.len());

    // Unit-id -> owning position. First claim in sequence order wins;
    // duplicate claims are a data-quality issue, not an error.
    let mut unit_owner: HashMap<&str, usize> = HashMap::new();
    for (position, entry) in entries.iter().enumerate() {
        for unit in &entry.module.owned_unit_ids {
            match unit_owner.entry(unit.as_str()) {
                Entry::Occupied(existing) => {
                    debug!(
                        unit = %unit,
                        kept = %entries[*existing.get()].id(),
                        ignored = %entry.id(),
                        "duplicate compiled-unit claim, keeping first owner"
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
        }
    }

    // Id -> position, first occurrence wins.
    let mut id_index: HashMap<&ModuleId, usize> = HashMap::new();
    for (position, entry) in entries.iter().enumerate() {
        id_index.entry(entry.id()).or_insert(position);
    }

    for (position, entry) in entries.iter().enumerate() {
        for dependency_id in &entry.module.mandatory_dependency_ids {
            match id_index.get(dependency_id) {
                Some(&target) => graph.add_edge(position, target, EdgeKind::Mandatory),
                None => graph.record_unresolved(position, dependency_id.clone(), false),
            }
        }

        for dependency_id in &entry.module.optional_dependency_ids {
            match id_index.get(dependency_id) {
                Some(&target) => graph.add_edge(position, target, EdgeKind::Optional),
                None => graph.record_unresolved(position, dependency_id.clone(), true),
            }
        }

        for unit in &entry.module.referenced_unit_ids {
            if let Some(&owner) = unit_owner.get(unit.as_str()) {
                if owner != position {
                    graph.add_edge(position, owner, EdgeKind::Inferred);
                }
            }
        }
    }

    graph
}
