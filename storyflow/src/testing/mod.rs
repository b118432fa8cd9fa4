//! Testing utilities for storyflow stories.
//!
//! This module provides:
//! - Reference fixtures
//! - Mock and recording steps
//! - A trace collector
//! - Assertions for run results

mod assertions;
mod collector;
pub mod fixtures;
mod mocks;

pub use assertions::{
    assert_context, assert_failed_on, assert_failure, assert_success, assert_value,
};
pub use collector::Collector;
pub use mocks::{MockStep, RecordedCall, RecordingStep};
