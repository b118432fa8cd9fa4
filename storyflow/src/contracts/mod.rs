//! Contract validation for story arguments.
//!
//! This module provides:
//! - Named value converters
//! - Contracts mapping context keys to converters
//! - Scope shrinking for nested stories

mod contract;
pub mod converters;

pub use contract::{ConvertFn, Contract, Converter};
