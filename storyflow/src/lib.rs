//! # Storyflow
//!
//! A declarative story execution engine.
//!
//! A story is an ordered list of named steps run against an append-only
//! context. Each step answers with one outcome:
//!
//! - **Next**: add keys to the context and continue
//! - **Abort**: fail the whole call
//! - **Return**: finish the whole call with a value
//! - **ScopeEnd**: end the innermost story and let its parent continue
//!
//! Stories nest: a slot may name another story, or be served by a story
//! bound elsewhere and injected at construction time.
//!
//! ## Quick Start
//!
//! ```rust
//! use storyflow::prelude::*;
//! use serde_json::{json, Value};
//!
//! let registry = StepRegistry::new("Shop")
//!     .step("price", |_ctx: &Context| Outcome::next_value("price", 10))
//!     .step("total", |ctx: &Context| {
//!         let (Some(price), Some(count)) = (
//!             ctx.get("price").ok().and_then(Value::as_i64),
//!             ctx.get("count").ok().and_then(Value::as_i64),
//!         ) else {
//!             return Outcome::abort_because("price and count must be integers");
//!         };
//!         Outcome::returning(price * count)
//!     })
//!     .story(
//!         StoryBuilder::new("Shop", "buy")
//!             .argument("count")
//!             .slots(["price", "total"])
//!             .build()?,
//!     );
//!
//! let buy = registry.instance().story("buy")?;
//! assert_eq!(buy.call([json!(3)])?, Some(json!(30)));
//! assert_eq!(buy.to_string(), "Shop.buy\n  price\n  total");
//!
//! let result = buy.run([json!(3)])?;
//! assert_eq!(result.context().get("price")?, &json!(10));
//! assert!(result.context().get("discount").is_err());
//! # Ok::<(), storyflow::errors::StoryError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, missing_docs, rust_2018_idioms)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod contracts;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod steps;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{EventLevel, StoryConfig};
    pub use crate::context::{Context, Origin};
    pub use crate::contracts::{converters, Contract, Converter};
    pub use crate::core::{Outcome, StepStatus};
    pub use crate::errors::{
        AbortError, ArityError, ContractError, ContractErrorInfo, CycleDetectedError,
        DeclarationError, DuplicateKeyError, MissingKeyError, ResolveError, StoryError,
        ValueOfFailureError,
    };
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink,
    };
    pub use crate::observability::{Trace, TraceNode, TraceSink};
    pub use crate::pipeline::{
        Arguments, Instance, RunResult, StepRegistry, Story, StoryBuilder, StoryDefinition,
        Substitute,
    };
    pub use crate::steps::{FnStep, NoOpStep, Step};
}
