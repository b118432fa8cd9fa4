//! Mock steps for testing.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::context::Context;
use crate::core::Outcome;
use crate::steps::Step;

/// A mock step that counts calls and returns a configurable outcome.
#[derive(Debug)]
pub struct MockStep {
    outcome: Mutex<Outcome>,
    call_count: Mutex<usize>,
}

impl Default for MockStep {
    fn default() -> Self {
        Self::new(Outcome::next())
    }
}

impl MockStep {
    /// Creates a mock answering `outcome`.
    #[must_use]
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            call_count: Mutex::new(0),
        }
    }

    /// Sets the outcome to return.
    pub fn set_outcome(&self, outcome: Outcome) {
        *self.outcome.lock() = outcome;
    }

    /// Returns the number of times the step was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock()
    }
}

impl Step for MockStep {
    fn call(&self, _ctx: &Context) -> Outcome {
        *self.call_count.lock() += 1;
        self.outcome.lock().clone()
    }
}

/// One call seen by a [`RecordingStep`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The context the step was called with.
    pub context: Context,
    /// The outcome it answered.
    pub outcome: Outcome,
}

/// Wraps a step and records every call to it.
#[derive(Debug)]
pub struct RecordingStep {
    inner: Arc<dyn Step>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingStep {
    /// Wraps `inner`.
    #[must_use]
    pub fn wrap(inner: Arc<dyn Step>) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns all recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Returns the number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clears recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl Step for RecordingStep {
    fn call(&self, ctx: &Context) -> Outcome {
        let outcome = self.inner.call(ctx);
        self.calls.lock().push(RecordedCall {
            context: ctx.clone(),
            outcome: outcome.clone(),
        });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::FnStep;
    use serde_json::json;

    #[test]
    fn test_mock_step() {
        let step = MockStep::default();
        let ctx = Context::new();

        assert_eq!(step.call(&ctx), Outcome::next());
        step.set_outcome(Outcome::abort());
        assert_eq!(step.call(&ctx), Outcome::abort());
        assert_eq!(step.call_count(), 2);
    }

    #[test]
    fn test_recording_step() {
        let inner = Arc::new(FnStep::new("one", |_ctx: &Context| Outcome::next_value("x", 1)));
        let step = RecordingStep::wrap(inner);
        let ctx = Context::seed([("a", json!(1))]).unwrap();

        step.call(&ctx);

        let calls = step.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].context, ctx);
        assert_eq!(calls[0].outcome, Outcome::next_value("x", 1));

        step.clear();
        assert_eq!(step.call_count(), 0);
    }
}
