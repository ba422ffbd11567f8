//! Export operations exposed to the HTTP layer.

use std::sync::Arc;

use noteflow_core::error::AppError;
use noteflow_core::types::JobId;
use noteflow_entity::export::{ExportFormat, ExportJob, JobStatus};
use noteflow_service::RequestContext;
use noteflow_service::note::NoteSource;

use crate::render::ExportArtifact;
use crate::scheduler::ProgressScheduler;
use crate::store::ExportJobStore;

/// Creates export jobs, reports their status, and renders finished
/// artifacts.
#[derive(Clone)]
pub struct ExportService {
    store: Arc<ExportJobStore>,
    scheduler: ProgressScheduler,
    notes: Arc<dyn NoteSource>,
}

impl std::fmt::Debug for ExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportService")
            .field("jobs", &self.store.len())
            .field("active", &self.scheduler.active())
            .finish()
    }
}

impl ExportService {
    /// Creates a new export service.
    pub fn new(
        store: Arc<ExportJobStore>,
        scheduler: ProgressScheduler,
        notes: Arc<dyn NoteSource>,
    ) -> Self {
        Self {
            store,
            scheduler,
            notes,
        }
    }

    /// The job store.
    pub fn store(&self) -> &Arc<ExportJobStore> {
        &self.store
    }

    /// The scheduler advancing jobs.
    pub fn scheduler(&self) -> &ProgressScheduler {
        &self.scheduler
    }

    /// Creates a pending job for the caller and schedules its advancement.
    pub fn create(&self, ctx: &RequestContext, format: ExportFormat) -> ExportJob {
        let job = self.store.create(ctx.user_id, format);
        self.scheduler.schedule(job.id);
        job
    }

    /// Returns the caller's job.
    pub fn get_status(&self, ctx: &RequestContext, job_id: &str) -> Result<ExportJob, AppError> {
        let id = parse_job_id(job_id)?;
        self.store.get_owned(id, ctx.user_id)
    }

    /// Renders the artifact of a completed job from the caller's current
    /// notes.
    pub async fn get_artifact(
        &self,
        ctx: &RequestContext,
        job_id: &str,
    ) -> Result<ExportArtifact, AppError> {
        let job = self.get_status(ctx, job_id)?;
        if job.status != JobStatus::Completed {
            return Err(AppError::invalid_state("Export not completed"));
        }

        let notes = self.notes.notes_for(ctx.user_id).await?;
        tracing::info!(
            job_id = %job.id,
            format = %job.format,
            notes = notes.len(),
            "Rendering export artifact"
        );
        ExportArtifact::render(job.format, &notes).map_err(|e| {
            tracing::error!(job_id = %job.id, error = %e, "Export rendering failed");
            e
        })
    }
}

/// Malformed ids cannot name an existing job, so they are `NotFound`.
fn parse_job_id(raw: &str) -> Result<JobId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found("Job not found"))
}
