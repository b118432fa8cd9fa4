//! Trace collection for tests.

use crate::observability::{Trace, TraceSink};
use parking_lot::RwLock;

/// A trace sink keeping the latest trace, optionally only traces that
/// entered a given slot.
#[derive(Debug, Default)]
pub struct Collector {
    slot: Option<String>,
    last: RwLock<Option<Trace>>,
    count: RwLock<usize>,
}

impl Collector {
    /// Creates a collector keeping every trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collector keeping only traces that entered `slot`.
    #[must_use]
    pub fn for_slot(slot: impl Into<String>) -> Self {
        Self {
            slot: Some(slot.into()),
            ..Self::default()
        }
    }

    /// Returns the latest kept trace.
    #[must_use]
    pub fn trace(&self) -> Option<Trace> {
        self.last.read().clone()
    }

    /// Renders the latest kept trace.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.last.read().as_ref().map(Trace::render)
    }

    /// Returns how many traces were kept.
    #[must_use]
    pub fn count(&self) -> usize {
        *self.count.read()
    }
}

impl TraceSink for Collector {
    fn record(&self, trace: &Trace) {
        let wanted = self
            .slot
            .as_deref()
            .map_or(true, |slot| trace.find(slot).is_some());
        if wanted {
            *self.last.write() = Some(trace.clone());
            *self.count.write() += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::TraceNode;
    use uuid::Uuid;

    #[test]
    fn test_collector_keeps_latest() {
        let collector = Collector::new();
        assert!(collector.render().is_none());

        collector.record(&Trace::new(Uuid::new_v4(), "Empty.x"));
        collector.record(&Trace::new(Uuid::new_v4(), "Simple.x"));

        assert_eq!(collector.count(), 2);
        assert_eq!(collector.trace().unwrap().story, "Simple.x");
    }

    #[test]
    fn test_collector_for_slot() {
        let collector = Collector::for_slot("two");
        collector.record(&Trace::new(Uuid::new_v4(), "Empty.x"));
        assert_eq!(collector.count(), 0);

        let mut trace = Trace::new(Uuid::new_v4(), "Simple.x");
        trace.nodes.push(TraceNode::step("two", None));
        collector.record(&trace);

        assert_eq!(collector.count(), 1);
        assert_eq!(collector.render().unwrap(), "Proxy(Simple.x):\n  two");
    }
}
