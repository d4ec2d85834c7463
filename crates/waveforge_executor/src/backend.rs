//! The Execution Backend interface: the abstract boundary to whatever
//! process actually performs an intent. The transport the real backend
//! uses (subprocess, RPC, in-process callback) is an adapter above this
//! trait, mirroring §9's note that the background-worker mechanism is not
//! part of the core model.

use async_trait::async_trait;

use waveforge_types::{IntentResult, PlanIntent};

use crate::context::DispatchContext;

#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Execute one attempt of `intent` under the given `context`. The
    /// operation blocks until the intent is either complete or has
    /// produced a terminal failure, and may be invoked concurrently from
    /// multiple tasks.
    async fn execute(&self, intent: &PlanIntent, context: &DispatchContext) -> IntentResult;
}
