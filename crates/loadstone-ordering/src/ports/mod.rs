//! Ports layer: inbound API trait and outbound collaborator traits.

pub mod inbound;
pub mod outbound;

pub use inbound::LoadOrderApi;
pub use outbound::{ModuleCatalog, SelectionRecord, UnitInspector};
