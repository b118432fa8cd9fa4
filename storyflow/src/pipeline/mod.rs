//! Story declaration, binding and execution.
//!
//! A story is declared once as a [`StoryDefinition`], registered on a
//! [`StepRegistry`] next to its steps, and bound through an [`Instance`]
//! into a callable [`Story`].

mod arguments;
mod bind;
mod builder;
mod executor;
mod registry;
mod result;
mod spec;
mod story;

pub use arguments::Arguments;
pub use builder::StoryBuilder;
pub use registry::{Instance, StepRegistry, Substitute};
pub use result::RunResult;
pub use spec::StoryDefinition;
pub use story::Story;
