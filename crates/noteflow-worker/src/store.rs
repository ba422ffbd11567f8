//! In-memory export job table.

use dashmap::DashMap;

use noteflow_core::error::AppError;
use noteflow_core::types::{JobId, UserId};
use noteflow_entity::export::{ExportFormat, ExportJob, JobStatus};

use crate::timeline::{ExportTimeline, StepOutcome};

/// Holds every export job keyed by id.
///
/// Reads clone the record under the shard lock and advancement mutates it
/// under the same lock, so status and progress are always observed as a
/// consistent pair.
#[derive(Debug)]
pub struct ExportJobStore {
    jobs: DashMap<JobId, ExportJob>,
    timeline: ExportTimeline,
}

impl ExportJobStore {
    /// Creates an empty store that advances jobs along `timeline`.
    pub fn new(timeline: ExportTimeline) -> Self {
        Self {
            jobs: DashMap::new(),
            timeline,
        }
    }

    /// The timeline this store advances jobs along.
    pub fn timeline(&self) -> &ExportTimeline {
        &self.timeline
    }

    /// Inserts a new pending job and returns a copy of it.
    pub fn create(&self, owner: UserId, format: ExportFormat) -> ExportJob {
        let job = ExportJob::pending(owner, format);
        self.jobs.insert(job.id, job.clone());
        tracing::info!(job_id = %job.id, user_id = %owner, format = %format, "Export job created");
        job
    }

    /// Returns a snapshot of the job if it exists and belongs to `owner`.
    ///
    /// A missing job and a job owned by someone else produce the same
    /// `NotFound` error.
    pub fn get_owned(&self, id: JobId, owner: UserId) -> Result<ExportJob, AppError> {
        self.jobs
            .get(&id)
            .filter(|job| job.is_owned_by(owner))
            .map(|job| job.value().clone())
            .ok_or_else(|| AppError::not_found("Job not found"))
    }

    /// Applies one advancement step.
    ///
    /// Returns the step outcome with a snapshot taken under the same lock,
    /// or `None` if the job no longer exists.
    pub fn advance(&self, id: JobId) -> Option<(StepOutcome, ExportJob)> {
        let mut entry = self.jobs.get_mut(&id)?;
        let outcome = self.timeline.step(entry.value_mut());
        let snapshot = entry.value().clone();
        drop(entry);

        match outcome {
            StepOutcome::Started => {
                tracing::info!(job_id = %id, progress = snapshot.progress, "Export job processing")
            }
            StepOutcome::Progressed => {
                tracing::debug!(job_id = %id, progress = snapshot.progress, "Export job progressed")
            }
            StepOutcome::Completed => tracing::info!(job_id = %id, "Export job completed"),
            StepOutcome::Unchanged => {}
        }
        Some((outcome, snapshot))
    }

    /// Moves a non-terminal job to `failed` with `reason`.
    ///
    /// Returns `true` if the job changed. Terminal or missing jobs are left
    /// alone.
    pub fn fail(&self, id: JobId, reason: &str) -> bool {
        let Some(mut job) = self.jobs.get_mut(&id) else {
            return false;
        };
        if job.status.is_terminal() {
            return false;
        }
        job.status = JobStatus::Failed;
        job.error = Some(reason.to_string());
        drop(job);

        tracing::warn!(job_id = %id, reason = %reason, "Export job failed");
        true
    }

    /// Removes a job record.
    pub fn remove(&self, id: JobId) -> Option<ExportJob> {
        self.jobs.remove(&id).map(|(_, job)| job)
    }

    /// Number of jobs held.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the store holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl Default for ExportJobStore {
    fn default() -> Self {
        Self::new(ExportTimeline::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteflow_core::error::ErrorKind;

    #[test]
    fn test_create_is_pending_and_owned() {
        let store = ExportJobStore::default();
        let owner = UserId::new();
        let job = store.create(owner, ExportFormat::Pdf);

        let fetched = store.get_owned(job.id, owner).expect("owner can read");
        assert_eq!(fetched.status, JobStatus::Pending);
        assert_eq!(fetched.progress, 0);
        assert_eq!(fetched.format, ExportFormat::Pdf);
    }

    #[test]
    fn test_foreign_and_missing_are_indistinguishable() {
        let store = ExportJobStore::default();
        let job = store.create(UserId::new(), ExportFormat::Json);

        let foreign = store.get_owned(job.id, UserId::new()).unwrap_err();
        let missing = store.get_owned(JobId::new(), UserId::new()).unwrap_err();
        assert!(foreign.is(ErrorKind::NotFound));
        assert_eq!(foreign.message, missing.message);
    }

    #[test]
    fn test_manual_advance_to_completion() {
        let store = ExportJobStore::default();
        let owner = UserId::new();
        let job = store.create(owner, ExportFormat::Json);

        let mut last = 0;
        for _ in 0..10 {
            let (_, snapshot) = store.advance(job.id).expect("job exists");
            assert!(snapshot.progress >= last);
            last = snapshot.progress;
        }
        let done = store.get_owned(job.id, owner).expect("read");
        assert_eq!((done.status, done.progress), (JobStatus::Completed, 100));

        let (outcome, _) = store.advance(job.id).expect("job exists");
        assert_eq!(outcome, StepOutcome::Unchanged);
    }

    #[test]
    fn test_advance_of_removed_job_is_none() {
        let store = ExportJobStore::default();
        let job = store.create(UserId::new(), ExportFormat::Json);
        store.remove(job.id);
        assert!(store.advance(job.id).is_none());
        assert!(store.advance(JobId::new()).is_none());
    }

    #[test]
    fn test_fail_is_final() {
        let store = ExportJobStore::default();
        let owner = UserId::new();
        let job = store.create(owner, ExportFormat::Json);
        store.advance(job.id);

        assert!(store.fail(job.id, "shutdown"));
        assert!(!store.fail(job.id, "again"));
        let (outcome, snapshot) = store.advance(job.id).expect("job exists");
        assert_eq!(outcome, StepOutcome::Unchanged);
        assert_eq!(snapshot.status, JobStatus::Failed);
        assert_eq!(snapshot.progress, 10);
        assert_eq!(snapshot.error.as_deref(), Some("shutdown"));
    }

    #[test]
    fn test_fail_on_completed_is_noop() {
        let store = ExportJobStore::default();
        let owner = UserId::new();
        let job = store.create(owner, ExportFormat::Json);
        while store
            .advance(job.id)
            .is_some_and(|(outcome, _)| !outcome.is_final())
        {}
        assert!(!store.fail(job.id, "late"));
        let done = store.get_owned(job.id, owner).expect("read");
        assert_eq!(done.status, JobStatus::Completed);
        assert!(done.error.is_none());
    }
}
