//! Client-side polling of an export job until it finishes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};

use noteflow_core::types::JobId;
use noteflow_entity::export::{ExportJobView, JobStatus};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Default delay between status reads.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// The two server calls the poller needs.
#[async_trait]
pub trait ExportBackend: Send + Sync + 'static {
    /// Reads the job's current state.
    async fn job_status(&self, job_id: JobId) -> Result<ExportJobView, ClientError>;

    /// Downloads the finished artifact.
    async fn download_artifact(&self, job_id: JobId) -> Result<Bytes, ClientError>;
}

#[async_trait]
impl ExportBackend for ApiClient {
    async fn job_status(&self, job_id: JobId) -> Result<ExportJobView, ClientError> {
        ApiClient::job_status(self, &job_id.to_string()).await
    }

    async fn download_artifact(&self, job_id: JobId) -> Result<Bytes, ClientError> {
        self.download_export(&job_id.to_string()).await
    }
}

/// How a polling task ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// The job completed and its artifact was downloaded.
    Completed {
        /// Final job state.
        job: ExportJobView,
        /// Artifact bytes.
        artifact: Bytes,
    },
    /// The server reported the job as failed.
    Failed {
        /// Final job state.
        job: ExportJobView,
        /// User-visible reason.
        reason: String,
    },
    /// A status read or the download failed.
    Error(ClientError),
    /// Polling was cancelled before the job finished.
    Cancelled,
}

/// Starts polling tasks with a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct ExportPoller {
    interval: Duration,
}

impl Default for ExportPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl ExportPoller {
    /// Creates a poller reading status every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Polling interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawns a task polling `job_id`.
    ///
    /// The first read happens one interval after the call. Dropping the
    /// returned handle cancels the task.
    pub fn start(&self, backend: Arc<dyn ExportBackend>, job_id: JobId) -> PollHandle {
        let cancel = CancellationToken::new();
        let (progress_tx, progress_rx) = watch::channel(None);
        let interval = self.interval;
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_cancel.cancelled() => PollOutcome::Cancelled,
                outcome = poll(backend, job_id, interval, progress_tx) => outcome,
            }
        });

        PollHandle {
            job_id,
            progress: progress_rx,
            task,
            guard: cancel.clone().drop_guard(),
            cancel,
        }
    }
}

async fn poll(
    backend: Arc<dyn ExportBackend>,
    job_id: JobId,
    interval: Duration,
    progress: watch::Sender<Option<ExportJobView>>,
) -> PollOutcome {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let job = match backend.job_status(job_id).await {
            Ok(job) => job,
            Err(e) => {
                tracing::warn!(job_id = %job_id, error = %e, "Export status check failed");
                return PollOutcome::Error(e);
            }
        };
        progress.send_replace(Some(job.clone()));
        tracing::debug!(job_id = %job_id, status = %job.status, progress = job.progress, "Export status");

        match job.status {
            JobStatus::Completed => {
                return match backend.download_artifact(job_id).await {
                    Ok(artifact) => PollOutcome::Completed { job, artifact },
                    Err(e) => {
                        tracing::warn!(job_id = %job_id, error = %e, "Export download failed");
                        PollOutcome::Error(e)
                    }
                };
            }
            JobStatus::Failed => {
                let reason = job
                    .error
                    .clone()
                    .unwrap_or_else(|| "Export failed".to_string());
                return PollOutcome::Failed { job, reason };
            }
            JobStatus::Pending | JobStatus::Processing => {}
        }
    }
}

/// A running polling task.
pub struct PollHandle {
    job_id: JobId,
    progress: watch::Receiver<Option<ExportJobView>>,
    task: JoinHandle<PollOutcome>,
    cancel: CancellationToken,
    guard: DropGuard,
}

impl std::fmt::Debug for PollHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollHandle")
            .field("job_id", &self.job_id)
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

impl PollHandle {
    /// The job being polled.
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Receiver of the most recent status read.
    pub fn progress(&self) -> watch::Receiver<Option<ExportJobView>> {
        self.progress.clone()
    }

    /// Stops polling. Any in-flight request is abandoned.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the task to end. A panicking task is reported as an error.
    pub async fn wait(self) -> PollOutcome {
        let Self { task, guard, .. } = self;
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => {
                tracing::error!(error = %e, "Export polling task panicked");
                PollOutcome::Error(ClientError::Task(e.to_string()))
            }
            Err(_) => PollOutcome::Cancelled,
        };
        guard.disarm();
        outcome
    }
}
