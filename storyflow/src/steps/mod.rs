//! Step trait and implementations.
//!
//! Steps are the leaf operations of a story: they read the context and
//! answer with one [`Outcome`].

use crate::context::Context;
use crate::core::Outcome;
use std::fmt::Debug;

/// Trait for leaf steps.
pub trait Step: Send + Sync + Debug {
    /// Runs the step against the context accumulated so far.
    fn call(&self, ctx: &Context) -> Outcome;
}

/// A simple function-based step.
pub struct FnStep<F>
where
    F: Fn(&Context) -> Outcome + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnStep<F>
where
    F: Fn(&Context) -> Outcome + Send + Sync,
{
    /// Creates a new function-based step.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    /// Returns the step name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<F> Debug for FnStep<F>
where
    F: Fn(&Context) -> Outcome + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish()
    }
}

impl<F> Step for FnStep<F>
where
    F: Fn(&Context) -> Outcome + Send + Sync,
{
    fn call(&self, ctx: &Context) -> Outcome {
        (self.func)(ctx)
    }
}

/// A step that continues without setting anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStep;

impl Step for NoOpStep {
    fn call(&self, _ctx: &Context) -> Outcome {
        Outcome::next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fn_step() {
        let step = FnStep::new("double", |ctx: &Context| {
            let d = ctx.get("d").ok().and_then(serde_json::Value::as_i64).unwrap_or(0);
            Outcome::returning(d * 2)
        });
        let ctx = Context::seed([("d", json!(3))]).unwrap();

        assert_eq!(step.name(), "double");
        assert_eq!(step.call(&ctx), Outcome::returning(6));
        assert!(format!("{step:?}").contains("double"));
    }

    #[test]
    fn test_noop_step() {
        assert_eq!(NoOpStep.call(&Context::new()), Outcome::next());
    }
}
