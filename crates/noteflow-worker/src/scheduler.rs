//! Timer-driven advancement of export jobs.

use std::sync::Arc;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use noteflow_core::types::JobId;

use crate::store::ExportJobStore;

/// Reason recorded on jobs interrupted by server shutdown.
pub const SHUTDOWN_REASON: &str = "Export interrupted by server shutdown";

/// Spawns one advancement task per job and cancels them all on shutdown.
///
/// Each task waits the timeline's start delay, applies the first step,
/// then applies one step per tick until the job is terminal or gone. A
/// task cancelled before its job finishes marks the job failed.
#[derive(Debug, Clone)]
pub struct ProgressScheduler {
    store: Arc<ExportJobStore>,
    shutdown: CancellationToken,
    tasks: TaskTracker,
}

impl ProgressScheduler {
    /// Creates a scheduler advancing jobs held in `store`.
    pub fn new(store: Arc<ExportJobStore>) -> Self {
        Self {
            store,
            shutdown: CancellationToken::new(),
            tasks: TaskTracker::new(),
        }
    }

    /// Starts advancing `job_id` in the background.
    pub fn schedule(&self, job_id: JobId) {
        if self.shutdown.is_cancelled() {
            self.store.fail(job_id, SHUTDOWN_REASON);
            return;
        }

        let store = Arc::clone(&self.store);
        let cancel = self.shutdown.child_token();
        self.tasks.spawn(async move {
            drive(store, job_id, cancel).await;
        });
    }

    /// Number of advancement tasks still running.
    pub fn active(&self) -> usize {
        self.tasks.len()
    }

    /// Cancels every running task and waits for them to finish.
    pub async fn shutdown(&self) {
        tracing::info!(
            "Export scheduler shutting down with {} active job(s)",
            self.tasks.len()
        );
        self.shutdown.cancel();
        self.tasks.close();
        self.tasks.wait().await;
        tracing::info!("Export scheduler shut down complete");
    }
}

async fn drive(store: Arc<ExportJobStore>, job_id: JobId, cancel: CancellationToken) {
    let timeline = *store.timeline();

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            store.fail(job_id, SHUTDOWN_REASON);
            return;
        }
        _ = time::sleep(timeline.start_delay) => {}
    }

    match store.advance(job_id) {
        Some((outcome, _)) if !outcome.is_final() => {}
        _ => return,
    }

    let mut ticker = time::interval_at(
        Instant::now() + timeline.tick_interval,
        timeline.tick_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                store.fail(job_id, SHUTDOWN_REASON);
                return;
            }
            _ = ticker.tick() => {}
        }

        match store.advance(job_id) {
            Some((outcome, _)) if !outcome.is_final() => {}
            Some(_) => return,
            None => {
                tracing::debug!(job_id = %job_id, "Export job vanished, stopping advancement");
                return;
            }
        }
    }
}
