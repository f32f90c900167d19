//! Application layer: service orchestration over the domain and algorithms.

pub mod service;

pub use service::{BatchScope, LoadOrderService};
