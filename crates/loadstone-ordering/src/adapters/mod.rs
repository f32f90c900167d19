//! Adapters implementing the outbound ports with in-memory data.

mod catalog;
mod inspector;

pub use catalog::StaticCatalog;
pub use inspector::StaticInspector;
