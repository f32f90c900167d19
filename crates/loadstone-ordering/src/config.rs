//! Configuration for the load-order core.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ModuleId;

/// Ordering configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Id of the distinguished base module the `Native` sort key puts first.
    pub native_module_id: String,
    /// Select official modules automatically when the catalog is loaded.
    pub auto_select_official: bool,
}

impl OrderingConfig {
    pub fn native_id(&self) -> ModuleId {
        ModuleId::new(self.native_module_id.as_str())
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            native_module_id: "Native".to_string(),
            auto_select_official: true,
        }
    }
}
