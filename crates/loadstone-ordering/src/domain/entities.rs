//! Core entities: module facts, live entries, and the dependency graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value_objects::{Conflict, EdgeKind, ModuleId, ModuleVersion};

/// Immutable module facts, supplied by the catalog loader.
///
/// Identity is the case-insensitive `id` captured at construction; nothing
/// here changes after load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub version: ModuleVersion,
    pub official: bool,
    pub singleplayer: bool,
    /// Declared hard dependencies, in declaration order.
    pub mandatory_dependency_ids: Vec<ModuleId>,
    /// Declared soft dependencies, in declaration order.
    pub optional_dependency_ids: Vec<ModuleId>,
    /// Compiled-unit identifiers this module provides.
    pub owned_unit_ids: Vec<String>,
    /// Compiled-unit identifiers this module's units reference; populated by
    /// the external inspector once per load.
    pub referenced_unit_ids: Vec<String>,
}

impl Module {
    pub fn new(id: impl Into<ModuleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: ModuleVersion::EMPTY,
            official: false,
            singleplayer: true,
            mandatory_dependency_ids: Vec::new(),
            optional_dependency_ids: Vec::new(),
            owned_unit_ids: Vec::new(),
            referenced_unit_ids: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: ModuleVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_official(mut self, official: bool) -> Self {
        self.official = official;
        self
    }

    pub fn with_singleplayer(mut self, singleplayer: bool) -> Self {
        self.singleplayer = singleplayer;
        self
    }

    pub fn with_mandatory_dependencies(mut self, ids: Vec<ModuleId>) -> Self {
        self.mandatory_dependency_ids = ids;
        self
    }

    pub fn with_optional_dependencies(mut self, ids: Vec<ModuleId>) -> Self {
        self.optional_dependency_ids = ids;
        self
    }

    pub fn with_owned_units(mut self, units: Vec<String>) -> Self {
        self.owned_unit_ids = units;
        self
    }

    pub fn with_referenced_units(mut self, units: Vec<String>) -> Self {
        self.referenced_unit_ids = units;
        self
    }
}

/// One module inside a user's ordered collection.
///
/// Position in the owning sequence is the load order; `original_index` is the
/// position at load time and only serves as the stable-sort tie-break.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModEntry {
    pub module: Module,
    /// User-controlled enablement.
    pub selected: bool,
    pub original_index: usize,
    /// Recomputed as a whole on every validation pass; stale between a
    /// mutation and the next pass.
    pub conflicts: Vec<Conflict>,
}

impl ModEntry {
    pub fn new(module: Module, original_index: usize) -> Self {
        Self {
            module,
            selected: false,
            original_index,
            conflicts: Vec::new(),
        }
    }

    pub fn id(&self) -> &ModuleId {
        &self.module.id
    }

    pub fn display_name(&self) -> &str {
        &self.module.name
    }

    /// Whether bulk toggles may touch this entry: community modules that can
    /// run single-player.
    pub fn is_eligible(&self) -> bool {
        !self.module.official && self.module.singleplayer
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn has_mandatory_conflicts(&self) -> bool {
        self.conflicts.iter().any(|conflict| !conflict.optional)
    }

    /// Multi-line, user-facing rendition of the current conflicts.
    pub fn conflict_summary(&self) -> String {
        let lines: Vec<String> = self
            .conflicts
            .iter()
            .map(|conflict| conflict.to_string())
            .collect();
        lines.join("\n")
    }
}

/// A directed dependency edge between two entries of one snapshot.
///
/// `dependent` depends on `dependency`: the dependency must precede it.
/// Both sides are positions into the entry sequence the graph was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub dependent: usize,
    pub dependency: usize,
    pub kind: EdgeKind,
}

/// A declared dependency id with no matching entry in the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedDependency {
    pub id: ModuleId,
    pub optional: bool,
}

/// Dependency graph over one snapshot of the entry sequence.
///
/// Nodes are sequence positions; the graph is only meaningful against the
/// exact ordering it was built from and is rebuilt after any mutation.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    node_count: usize,
    edges: Vec<DependencyEdge>,
    /// (dependent, dependency) -> position in `edges`, for duplicate collapse.
    edge_index: HashMap<(usize, usize), usize>,
    /// Per dependent: positions that must precede it.
    prerequisites: Vec<Vec<usize>>,
    /// Reverse adjacency: per dependency, the entries depending on it.
    dependents: Vec<Vec<usize>>,
    /// Dangling declared dependency ids, per dependent position.
    unresolved: HashMap<usize, Vec<UnresolvedDependency>>,
}

impl DependencyGraph {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            edge_index: HashMap::new(),
            prerequisites: vec![Vec::new(); node_count],
            dependents: vec![Vec::new(); node_count],
            unresolved: HashMap::new(),
        }
    }

    /// Add an edge; self-edges are ignored and duplicate (dependent,
    /// dependency) pairs collapse to one, keeping the strongest tag.
    pub fn add_edge(&mut self, dependent: usize, dependency: usize, kind: EdgeKind) {
        if dependent == dependency {
            return;
        }
        if let Some(&at) = self.edge_index.get(&(dependent, dependency)) {
            let existing = self.edges[at].kind;
            self.edges[at].kind = existing.strongest(kind);
            return;
        }
        self.edge_index
            .insert((dependent, dependency), self.edges.len());
        self.edges.push(DependencyEdge {
            dependent,
            dependency,
            kind,
        });
        self.prerequisites[dependent].push(dependency);
        self.dependents[dependency].push(dependent);
    }

    pub fn record_unresolved(&mut self, dependent: usize, id: ModuleId, optional: bool) {
        self.unresolved
            .entry(dependent)
            .or_default()
            .push(UnresolvedDependency { id, optional });
    }

    pub fn has_edge(&self, dependent: usize, dependency: usize) -> bool {
        self.edge_index.contains_key(&(dependent, dependency))
    }

    pub fn edge_kind(&self, dependent: usize, dependency: usize) -> Option<EdgeKind> {
        self.edge_index
            .get(&(dependent, dependency))
            .map(|&at| self.edges[at].kind)
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Positions that must precede `dependent`.
    pub fn prerequisites_of(&self, dependent: usize) -> &[usize] {
        &self.prerequisites[dependent]
    }

    /// Positions that list `dependency` as a prerequisite.
    pub fn dependents_of(&self, dependency: usize) -> &[usize] {
        &self.dependents[dependency]
    }

    pub fn unresolved_of(&self, dependent: usize) -> &[UnresolvedDependency] {
        self.unresolved
            .get(&dependent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
