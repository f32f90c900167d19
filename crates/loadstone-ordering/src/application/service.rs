//! Load-order service.
//!
//! Owns the ordered entry collection and orchestrates the pipeline: catalog
//! merge, graph construction, validation, and the sort operations. Designed
//! to run on a single UI or command thread; the caller serializes mutations.

use std::ops::{Deref, DerefMut};

use tracing::{debug, info, warn};

use crate::algorithms::{
    build_dependency_graph, multi_key_sort, stable_topological_sort, validate_load_order,
};
use crate::config::OrderingConfig;
use crate::domain::entities::ModEntry;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::SortKey;
use crate::ports::inbound::LoadOrderApi;
use crate::ports::outbound::{ModuleCatalog, UnitInspector};

/// Application service implementing [`LoadOrderApi`].
///
/// Every mutating operation ends with exactly one validation pass. Bulk
/// operations go through [`LoadOrderService::begin_batch`], which defers
/// validation until the scope is released.
pub struct LoadOrderService {
    config: OrderingConfig,
    entries: Vec<ModEntry>,
    suppress_validation: bool,
}

impl LoadOrderService {
    /// Create an empty service with default config.
    pub fn new() -> Self {
        Self::with_config(OrderingConfig::default())
    }

    pub fn with_config(config: OrderingConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            suppress_validation: false,
        }
    }

    /// Adopt a prepared entry sequence, validating it once.
    pub fn with_entries(config: OrderingConfig, entries: Vec<ModEntry>) -> Self {
        let mut service = Self::with_config(config);
        service.entries = entries;
        service.validate();
        service
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Populate the collection from the catalog and inspector ports.
    ///
    /// Persisted selection records come first, in persisted order; catalog
    /// modules without a record are appended unselected. Records without a
    /// matching module are dropped, duplicate ids are skipped, and official
    /// modules are auto-selected when configured. Unit references are
    /// attached once here and never mutated afterwards.
    pub fn load(&mut self, catalog: &dyn ModuleCatalog, inspector: &dyn UnitInspector) {
        let mut modules = catalog.modules();
        for module in modules.iter_mut() {
            let references = inspector.referenced_units(module);
            module.referenced_unit_ids = references;
        }

        self.entries.clear();

        for record in catalog.selection_records() {
            if self.entries.iter().any(|entry| entry.id() == &record.id) {
                continue;
            }
            let Some(position) = modules.iter().position(|module| module.id == record.id) else {
                warn!(id = %record.id, "persisted entry has no matching module, dropping");
                continue;
            };
            let module = modules.remove(position);
            let mut entry = ModEntry::new(module, self.entries.len());
            entry.selected = record.selected;
            if self.config.auto_select_official && entry.module.official {
                entry.selected = true;
            }
            self.entries.push(entry);
        }

        for module in modules {
            if self.entries.iter().any(|entry| entry.id() == &module.id) {
                continue;
            }
            let mut entry = ModEntry::new(module, self.entries.len());
            if self.config.auto_select_official && entry.module.official {
                entry.selected = true;
            }
            self.entries.push(entry);
        }

        info!(entry_count = self.entries.len(), "module catalog loaded");
        self.validate();
    }

    /// Start a bulk-mutation scope.
    ///
    /// While the scope is alive, `validate` calls are deferred; releasing it
    /// runs exactly one validation pass, including when the scope unwinds
    /// early. Scopes do not nest.
    pub fn begin_batch(&mut self) -> BatchScope<'_> {
        self.suppress_validation = true;
        BatchScope { service: self }
    }

    /// Rebuild the dependency graph and recompute every entry's conflicts.
    pub fn validate(&mut self) {
        if self.suppress_validation {
            return;
        }
        let graph = build_dependency_graph(&self.entries);
        validate_load_order(&mut self.entries, &graph);
        debug!(
            entry_count = self.entries.len(),
            edge_count = graph.edge_count(),
            conflict_count = self
                .entries
                .iter()
                .map(|entry| entry.conflicts.len())
                .sum::<usize>(),
            "load order validated"
        );
    }

    /// Dependency-respecting stable reorder.
    ///
    /// On a cycle the sequence is left exactly as it was and the error is
    /// returned; the caller decides whether to surface it or keep going.
    pub fn sort(&mut self) -> Result<(), OrderingError> {
        let graph = build_dependency_graph(&self.entries);
        match stable_topological_sort(&self.entries, &graph) {
            Ok(sorted) => {
                self.entries = sorted;
                info!(entry_count = self.entries.len(), "load order sorted");
                self.validate();
                Ok(())
            }
            Err(error) => {
                warn!(%error, "topological sort failed, order unchanged");
                self.validate();
                Err(error)
            }
        }
    }

    /// Dependency-unaware reorder by a chain of sort keys.
    pub fn sort_by_keys(&mut self, keys: &[SortKey]) {
        let native_id = self.config.native_id();
        multi_key_sort(&mut self.entries, keys, &native_id);
        self.validate();
    }

    pub fn move_to_top(&mut self, index: usize) -> Result<(), OrderingError> {
        if index == 0 || index >= self.entries.len() {
            return Err(self.index_error(index));
        }
        let entry = self.entries.remove(index);
        self.entries.insert(0, entry);
        self.validate();
        Ok(())
    }

    pub fn move_up(&mut self, index: usize) -> Result<(), OrderingError> {
        if index == 0 || index >= self.entries.len() {
            return Err(self.index_error(index));
        }
        self.entries.swap(index, index - 1);
        self.validate();
        Ok(())
    }

    pub fn move_down(&mut self, index: usize) -> Result<(), OrderingError> {
        if index + 1 >= self.entries.len() {
            return Err(self.index_error(index));
        }
        self.entries.swap(index, index + 1);
        self.validate();
        Ok(())
    }

    pub fn move_to_bottom(&mut self, index: usize) -> Result<(), OrderingError> {
        if index + 1 >= self.entries.len() {
            return Err(self.index_error(index));
        }
        let entry = self.entries.remove(index);
        self.entries.push(entry);
        self.validate();
        Ok(())
    }

    /// Set one entry's selection flag. Eligibility gating is a UI concern
    /// for single toggles; only the bulk operations filter on it.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), OrderingError> {
        if index >= self.entries.len() {
            return Err(self.index_error(index));
        }
        self.entries[index].selected = selected;
        self.validate();
        Ok(())
    }

    pub fn check_all(&mut self) {
        let mut scope = self.begin_batch();
        for entry in scope.entries.iter_mut().filter(|entry| entry.is_eligible()) {
            entry.selected = true;
        }
    }

    pub fn uncheck_all(&mut self) {
        let mut scope = self.begin_batch();
        for entry in scope.entries.iter_mut().filter(|entry| entry.is_eligible()) {
            entry.selected = false;
        }
    }

    pub fn invert_check(&mut self) {
        let mut scope = self.begin_batch();
        for entry in scope.entries.iter_mut().filter(|entry| entry.is_eligible()) {
            entry.selected = !entry.selected;
        }
    }

    pub fn entries(&self) -> &[ModEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&ModEntry> {
        self.entries.get(index)
    }

    pub fn has_conflicts(&self) -> bool {
        self.entries.iter().any(ModEntry::has_conflicts)
    }

    pub fn has_mandatory_conflicts(&self) -> bool {
        self.entries.iter().any(ModEntry::has_mandatory_conflicts)
    }

    /// Launcher module list: `_MODULES_*id1*id2*_MODULES_` over the selected
    /// entries in load order.
    pub fn enabled_mods_argument(&self) -> String {
        let ids: String = self
            .entries
            .iter()
            .filter(|entry| entry.selected)
            .map(|entry| format!("*{}", entry.id()))
            .collect();
        format!("_MODULES_{ids}*_MODULES_")
    }

    /// Full game argument string; launching the process stays external.
    pub fn launch_arguments(&self) -> String {
        format!("/singleplayer {}", self.enabled_mods_argument())
    }

    fn index_error(&self, index: usize) -> OrderingError {
        OrderingError::IndexOutOfBounds {
            index,
            len: self.entries.len(),
        }
    }
}

impl Default for LoadOrderService {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadOrderApi for LoadOrderService {
    fn validate(&mut self) {
        LoadOrderService::validate(self);
    }

    fn sort(&mut self) -> Result<(), OrderingError> {
        LoadOrderService::sort(self)
    }

    fn sort_by_keys(&mut self, keys: &[SortKey]) {
        LoadOrderService::sort_by_keys(self, keys);
    }

    fn move_to_top(&mut self, index: usize) -> Result<(), OrderingError> {
        LoadOrderService::move_to_top(self, index)
    }

    fn move_up(&mut self, index: usize) -> Result<(), OrderingError> {
        LoadOrderService::move_up(self, index)
    }

    fn move_down(&mut self, index: usize) -> Result<(), OrderingError> {
        LoadOrderService::move_down(self, index)
    }

    fn move_to_bottom(&mut self, index: usize) -> Result<(), OrderingError> {
        LoadOrderService::move_to_bottom(self, index)
    }

    fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), OrderingError> {
        LoadOrderService::set_selected(self, index, selected)
    }

    fn check_all(&mut self) {
        LoadOrderService::check_all(self);
    }

    fn uncheck_all(&mut self) {
        LoadOrderService::uncheck_all(self);
    }

    fn invert_check(&mut self) {
        LoadOrderService::invert_check(self);
    }

    fn entries(&self) -> &[ModEntry] {
        LoadOrderService::entries(self)
    }

    fn has_conflicts(&self) -> bool {
        LoadOrderService::has_conflicts(self)
    }

    fn has_mandatory_conflicts(&self) -> bool {
        LoadOrderService::has_mandatory_conflicts(self)
    }
}

/// Bulk-mutation scope returned by [`LoadOrderService::begin_batch`].
///
/// Dereferences to the service; dropping it re-enables validation and runs
/// the single deferred pass.
pub struct BatchScope<'a> {
    service: &'a mut LoadOrderService,
}

impl Deref for BatchScope<'_> {
    type Target = LoadOrderService;

    fn deref(&self) -> &Self::Target {
        self.service
    }
}

impl DerefMut for BatchScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.service
    }
}

impl Drop for BatchScope<'_> {
    fn drop(&mut self) {
        self.service.suppress_validation = false;
        self.service.validate();
    }
}
