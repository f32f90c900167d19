//! In-memory compiled-unit inspector adapter.

use std::collections::HashMap;

use crate::domain::entities::Module;
use crate::domain::value_objects::ModuleId;
use crate::ports::outbound::UnitInspector;

/// Inspector backed by a prepared reference table.
///
/// Modules without a prepared entry fall back to the reference list already
/// present on the module record, so a catalog that ships pre-inspected data
/// passes through unchanged.
#[derive(Clone, Debug, Default)]
pub struct StaticInspector {
    references: HashMap<ModuleId, Vec<String>>,
}

impl StaticInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_references(mut self, id: impl Into<ModuleId>, units: Vec<String>) -> Self {
        self.references.insert(id.into(), units);
        self
    }
}

impl UnitInspector for StaticInspector {
    fn referenced_units(&self, module: &Module) -> Vec<String> {
        self.references
            .get(&module.id)
            .cloned()
            .unwrap_or_else(|| module.referenced_unit_ids.clone())
    }
}
