//! The progress-event sink: a transport-agnostic boundary a caller plugs a
//! channel, a log line, or a test double into.

use waveforge_types::ProgressEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// An event sink that forwards every event to the `log` crate at `info`
/// level. The natural default when a caller has no channel of its own.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventSink;

impl EventSink for LoggingEventSink {
    fn emit(&self, event: ProgressEvent) {
        log::info!("{event:?}");
    }
}
