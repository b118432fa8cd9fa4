//! Context management for story execution.
//!
//! This module provides:
//! - The append-only [`Context`] accumulated by one story call
//! - Per-key provenance ([`Origin`])
//! - The provenance rendering used for debugging

#[cfg(test)]
mod context_tests;
mod origin;
mod render;
mod store;

pub use origin::Origin;
pub use store::{Context, ContextEntry};
