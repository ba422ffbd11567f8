//! Progress arithmetic for export jobs.
//!
//! A job's progress is simulated: the first step moves a pending job to
//! `processing` at the initial progress, every later step adds a fixed
//! increment, and the step that reaches 100 completes the job.

use std::time::Duration;

use noteflow_core::config::export::ExportConfig;
use noteflow_entity::export::{ExportJob, JobStatus};

/// What a single advancement step did to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// `pending -> processing` at the initial progress.
    Started,
    /// Progress increased, still processing.
    Progressed,
    /// Progress reached 100 and the job completed.
    Completed,
    /// The job was already terminal; nothing changed.
    Unchanged,
}

impl StepOutcome {
    /// Whether further steps can change the job.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Unchanged)
    }
}

/// Timing and increments that drive a job from creation to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTimeline {
    /// Delay before the first step.
    pub start_delay: Duration,
    /// Interval between later steps.
    pub tick_interval: Duration,
    /// Progress set by the first step.
    pub initial_progress: u8,
    /// Progress added by each later step.
    pub progress_step: u8,
}

impl ExportTimeline {
    /// Builds a timeline from configuration.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            start_delay: Duration::from_millis(config.start_delay_ms),
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            initial_progress: config.initial_progress,
            progress_step: config.progress_step,
        }
    }

    /// Applies one step to `job` in place.
    pub fn step(&self, job: &mut ExportJob) -> StepOutcome {
        match job.status {
            JobStatus::Completed | JobStatus::Failed => StepOutcome::Unchanged,
            JobStatus::Pending => {
                job.status = JobStatus::Processing;
                job.progress = self.initial_progress.min(100);
                if job.progress == 100 {
                    job.status = JobStatus::Completed;
                    StepOutcome::Completed
                } else {
                    StepOutcome::Started
                }
            }
            JobStatus::Processing => {
                let next = job.progress.saturating_add(self.progress_step);
                if next >= 100 {
                    job.progress = 100;
                    job.status = JobStatus::Completed;
                    StepOutcome::Completed
                } else {
                    job.progress = next;
                    StepOutcome::Progressed
                }
            }
        }
    }

    /// Number of steps a fresh job takes to complete.
    pub fn steps_to_complete(&self) -> u32 {
        let remaining = 100u32.saturating_sub(self.initial_progress as u32);
        let step = (self.progress_step as u32).max(1);
        1 + remaining.div_ceil(step)
    }
}

impl Default for ExportTimeline {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}
