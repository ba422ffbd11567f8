//! One export in flight at a time.

use std::sync::Arc;

use noteflow_core::types::JobId;

use crate::poller::{ExportBackend, ExportPoller, PollHandle, PollOutcome};

/// Owns at most one polling task.
///
/// Beginning a new export cancels the task of the previous one.
pub struct ExportSession {
    poller: ExportPoller,
    backend: Arc<dyn ExportBackend>,
    current: Option<PollHandle>,
}

impl std::fmt::Debug for ExportSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportSession")
            .field("poller", &self.poller)
            .field("current", &self.current.as_ref().map(PollHandle::job_id))
            .finish()
    }
}

impl ExportSession {
    /// Creates an idle session.
    pub fn new(poller: ExportPoller, backend: Arc<dyn ExportBackend>) -> Self {
        Self {
            poller,
            backend,
            current: None,
        }
    }

    /// Starts polling `job_id`, cancelling any earlier task first.
    pub fn begin(&mut self, job_id: JobId) -> &PollHandle {
        if let Some(previous) = self.current.take() {
            tracing::debug!(job_id = %previous.job_id(), "Cancelling previous export poll");
            previous.cancel();
        }
        self.current
            .insert(self.poller.start(Arc::clone(&self.backend), job_id))
    }

    /// The running task, if any.
    pub fn current(&self) -> Option<&PollHandle> {
        self.current.as_ref()
    }

    /// Cancels the running task.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }

    /// Waits for the running task to end. `None` when idle.
    pub async fn finish(&mut self) -> Option<PollOutcome> {
        match self.current.take() {
            Some(handle) => Some(handle.wait().await),
            None => None,
        }
    }
}
