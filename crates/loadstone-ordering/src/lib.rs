//! # Loadstone Ordering
//!
//! Load-order resolution for moddable games. Builds a dependency graph from
//! declared module metadata and inferred compiled-unit references, detects
//! ordering and missing-dependency conflicts against the user's mod list,
//! and rewrites the list with a cycle-aware, order-preserving topological
//! sort or a configurable multi-key sort.
//!
//! ## Architecture
//!
//! - **Domain**: core entities (Module, ModEntry, DependencyGraph) and value
//!   objects (ModuleId, ModuleVersion, Conflict)
//! - **Algorithms**: graph builder, order validator, stable Kahn sort,
//!   multi-key sort
//! - **Ports**: inbound (LoadOrderApi) and outbound (ModuleCatalog,
//!   UnitInspector)
//! - **Application**: LoadOrderService owning the ordered entry collection
//! - **Adapters**: in-memory implementations of the outbound ports
//!
//! The core is single-threaded and synchronous; callers serialize mutations
//! and trigger validation explicitly (bulk work goes through a batch scope
//! that defers it to a single pass).

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{StaticCatalog, StaticInspector};
pub use application::service::{BatchScope, LoadOrderService};
pub use config::OrderingConfig;
pub use domain::entities::*;
pub use domain::errors::OrderingError;
pub use domain::value_objects::*;
pub use ports::inbound::LoadOrderApi;
pub use ports::outbound::{ModuleCatalog, SelectionRecord, UnitInspector};
