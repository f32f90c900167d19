//! Load-order validator.
//!
//! Rebuilds every entry's conflict list against the current sequence. The
//! pass is deterministic and O(n·d); it never reorders entries and never
//! touches selection state.

use std::collections::HashMap;

use crate::domain::entities::{DependencyGraph, ModEntry};
use crate::domain::value_objects::{Conflict, ConflictKind, EdgeKind, ModuleId};

/// Recompute the conflicts of every entry from scratch.
///
/// A dependency is satisfied only by a *selected* entry ordered at or before
/// the dependent; an unselected module will not load at runtime, so it cannot
/// satisfy an ordering requirement. Inferred (compiled-unit) edges are checked
/// like mandatory ones, except when the same (dependent, counterpart) pair was
/// already flagged by a declared dependency.
pub fn validate_load_order(entries: &mut [ModEntry], graph: &DependencyGraph) {
    for entry in entries.iter_mut() {
        entry.conflicts.clear();
    }

    let mut pending: Vec<(usize, Conflict)> = Vec::new();
    {
        let snapshot: &[ModEntry] = entries;

        // First occurrence per id, overall and among selected entries.
        let mut present_at: HashMap<&ModuleId, usize> = HashMap::new();
        let mut selected_at: HashMap<&ModuleId, usize> = HashMap::new();
        for (position, entry) in snapshot.iter().enumerate() {
            present_at.entry(entry.id()).or_insert(position);
            if entry.selected {
                selected_at.entry(entry.id()).or_insert(position);
            }
        }
        let lookup = Lookup {
            snapshot,
            present_at,
            selected_at,
        };

        for (dependent, entry) in snapshot.iter().enumerate() {
            for dependency_id in &entry.module.mandatory_dependency_ids {
                lookup.check(dependent, dependency_id, false, &mut pending);
            }
            for dependency_id in &entry.module.optional_dependency_ids {
                lookup.check(dependent, dependency_id, true, &mut pending);
            }

            for &dependency in graph.prerequisites_of(dependent) {
                if graph.edge_kind(dependent, dependency) != Some(EdgeKind::Inferred) {
                    continue;
                }
                let dependency_id = snapshot[dependency].id();
                if already_flagged(&pending, dependent, dependency_id) {
                    continue;
                }
                lookup.check(dependent, dependency_id, false, &mut pending);
            }
        }
    }

    for (position, conflict) in pending {
        entries[position].conflicts.push(conflict);
    }
}

struct Lookup<'a> {
    snapshot: &'a [ModEntry],
    present_at: HashMap<&'a ModuleId, usize>,
    selected_at: HashMap<&'a ModuleId, usize>,
}

impl Lookup<'_> {
    fn check(
        &self,
        dependent: usize,
        dependency_id: &ModuleId,
        optional: bool,
        pending: &mut Vec<(usize, Conflict)>,
    ) {
        match self.selected_at.get(dependency_id) {
            None => {
                // Present-but-unselected gets its real display name; a
                // dangling id has nothing better than the id itself.
                let name = self
                    .present_at
                    .get(dependency_id)
                    .map(|&at| self.snapshot[at].display_name().to_string())
                    .unwrap_or_else(|| dependency_id.as_str().to_string());
                pending.push((
                    dependent,
                    Conflict::new(dependency_id.clone(), name, ConflictKind::Missing, optional),
                ));
            }
            Some(&found) if found > dependent => {
                pending.push((
                    found,
                    Conflict::new(
                        self.snapshot[dependent].id().clone(),
                        self.snapshot[dependent].display_name().to_string(),
                        ConflictKind::DependedByAbove,
                        optional,
                    ),
                ));
                pending.push((
                    dependent,
                    Conflict::new(
                        dependency_id.clone(),
                        self.snapshot[found].display_name().to_string(),
                        ConflictKind::DependencyBelow,
                        optional,
                    ),
                ));
            }
            Some(_) => {}
        }
    }
}

fn already_flagged(pending: &[(usize, Conflict)], dependent: usize, id: &ModuleId) -> bool {
    pending
        .iter()
        .any(|(position, conflict)| *position == dependent && &conflict.counterpart_id == id)
}
