//! Configuration for bound stories.

use serde::{Deserialize, Serialize};

/// Level used by the logging event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    /// Log events at debug level.
    Debug,
    /// Log events at info level.
    #[default]
    Info,
}

/// Configuration applied to every call of a bound story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryConfig {
    /// Whether lifecycle events are sent to the event sink.
    #[serde(default = "default_emit_events")]
    pub emit_events: bool,
    /// Whether finished traces are delivered to trace sinks.
    #[serde(default = "default_record_trace")]
    pub record_trace: bool,
    /// Maximum nesting depth accepted while binding.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Level for `LoggingEventSink::from_config`.
    #[serde(default)]
    pub event_level: EventLevel,
}

fn default_emit_events() -> bool {
    true
}

fn default_record_trace() -> bool {
    true
}

fn default_max_depth() -> usize {
    64
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            emit_events: default_emit_events(),
            record_trace: default_record_trace(),
            max_depth: default_max_depth(),
            event_level: EventLevel::default(),
        }
    }
}

impl StoryConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Enables or disables event emission.
    #[must_use]
    pub fn with_emit_events(mut self, emit: bool) -> Self {
        self.emit_events = emit;
        self
    }

    /// Enables or disables trace delivery.
    #[must_use]
    pub fn with_record_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the event level.
    #[must_use]
    pub fn with_event_level(mut self, level: EventLevel) -> Self {
        self.event_level = level;
        self
    }
}
