//! Core domain model types for storyflow.
//!
//! This module contains the fundamental types used throughout the engine:
//! - The step outcome algebra
//! - Step status used by execution traces

mod outcome;
mod status;

pub use outcome::Outcome;
pub use status::StepStatus;
