//! Outbound ports (driven collaborators).
//!
//! The catalog loader and the compiled-unit inspector live outside the core;
//! they hand over plain data and are called once per load.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Module;
use crate::domain::value_objects::ModuleId;

/// One persisted user selection, matched to a module by id at load time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub id: ModuleId,
    pub selected: bool,
}

impl SelectionRecord {
    pub fn new(id: impl Into<ModuleId>, selected: bool) -> Self {
        Self {
            id: id.into(),
            selected,
        }
    }
}

/// Source of module records and persisted selection state.
///
/// Reading metadata files and the persistence format are the adapter's
/// concern; the core only consumes the resulting records.
pub trait ModuleCatalog {
    /// Discovered modules, in catalog discovery order.
    fn modules(&self) -> Vec<Module>;

    /// Persisted selections, in persisted order; this order becomes the
    /// initial load order for the modules it matches.
    fn selection_records(&self) -> Vec<SelectionRecord>;
}

/// Compiled-unit inspection: which unit ids does a module's binary reference.
///
/// Called once per module per load; results become immutable module data.
pub trait UnitInspector {
    fn referenced_units(&self, module: &Module) -> Vec<String>;
}
