//! Per-dispatch context handed to the Execution Backend: the wave index,
//! the bound agent, the attempt number, predecessor artifacts, and a
//! cooperative cancellation handle. See §4.8 and §5 of the specification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use waveforge_types::AgentName;

/// A cheap, cloneable cooperative-cancellation flag. Setting it does not
/// interrupt an in-flight dispatch; the backend is expected to poll
/// `is_cancelled` at its own suspension points, per §5's "best-effort"
/// cancellation note.
#[derive(Debug, Clone, Default)]
pub struct CancellationHandle(Arc<AtomicBool>);

impl CancellationHandle {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything the backend needs beyond the intent spec itself: which wave
/// this dispatch belongs to, which agent it is bound to for this attempt,
/// the 1-indexed attempt number, the artifact references of every
/// predecessor intent, and a handle to check for cancellation.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub wave: usize,
    pub agent: AgentName,
    pub attempt: u32,
    pub predecessor_artifacts: Vec<String>,
    pub cancellation: CancellationHandle,
}
