//! Event sink system for observability.
//!
//! Stories report their lifecycle (`story.started`, `step.completed`,
//! `step.failed`, `step.skipped`, `step.returned`, `story.completed`,
//! `story.failed`) to an [`EventSink`].

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use parking_lot::RwLock;
use std::sync::Arc;

/// Event type names emitted by the executor.
pub mod types {
    /// A top-level call started.
    pub const STORY_STARTED: &str = "story.started";
    /// A top-level call finished without failure.
    pub const STORY_COMPLETED: &str = "story.completed";
    /// A top-level call was aborted.
    pub const STORY_FAILED: &str = "story.failed";
    /// A leaf step continued.
    pub const STEP_COMPLETED: &str = "step.completed";
    /// A leaf step aborted.
    pub const STEP_FAILED: &str = "step.failed";
    /// A leaf step ended its story.
    pub const STEP_SKIPPED: &str = "step.skipped";
    /// A leaf step returned the final value.
    pub const STEP_RETURNED: &str = "step.returned";
}

static GLOBAL_EVENT_SINK: RwLock<Option<Arc<dyn EventSink>>> = RwLock::new(None);

/// Sets the process-wide event sink.
pub fn set_event_sink(sink: Arc<dyn EventSink>) {
    *GLOBAL_EVENT_SINK.write() = Some(sink);
}

/// Clears the process-wide event sink.
pub fn clear_event_sink() {
    *GLOBAL_EVENT_SINK.write() = None;
}

/// Gets the process-wide event sink.
///
/// Returns a `NoOpEventSink` if no sink is set.
pub fn get_event_sink() -> Arc<dyn EventSink> {
    GLOBAL_EVENT_SINK
        .read()
        .clone()
        .unwrap_or_else(|| Arc::new(NoOpEventSink))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_sink_default() {
        clear_event_sink();
        get_event_sink().try_emit("test", None);
    }

    #[test]
    fn test_set_and_get_sink() {
        let sink: Arc<dyn EventSink> = Arc::new(LoggingEventSink::default());
        set_event_sink(sink);

        get_event_sink().try_emit("test.event", Some(serde_json::json!({"key": "value"})));

        clear_event_sink();
    }
}
