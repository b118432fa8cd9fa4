//! Observability for story execution.
//!
//! This module provides:
//! - Execution traces recorded for every call
//! - Static and dynamic text renderings
//! - `tracing` subscriber installation

mod logging;
mod render;
mod trace;

pub use logging::{init_json_logging, init_logging};
pub use render::{render_outline, render_trace, OutlineNode};
pub use trace::{NodeKind, Trace, TraceNode, TraceSink};
