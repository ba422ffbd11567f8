//! Export job status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an export job.
///
/// Transitions only move forward: `Pending -> Processing -> Completed`, or
/// from either non-terminal state to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Created, waiting for the first advancement step.
    Pending,
    /// Advancing on the timer.
    Processing,
    /// Finished; the artifact can be fetched.
    Completed,
    /// Stopped before completion.
    Failed,
}

impl JobStatus {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
