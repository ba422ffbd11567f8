//! Export job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use noteflow_core::types::{JobId, UserId};

use super::format::ExportFormat;
use super::status::JobStatus;

/// A server-side export job record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    /// Unique job identifier.
    pub id: JobId,
    /// User who requested the export. Never exposed to clients.
    pub owner: UserId,
    /// Current status.
    pub status: JobStatus,
    /// Progress percentage, 0..=100.
    pub progress: u8,
    /// Artifact format.
    pub format: ExportFormat,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// Failure reason, set only when `status` is `Failed`.
    pub error: Option<String>,
}

impl ExportJob {
    /// Create a pending job at zero progress.
    pub fn pending(owner: UserId, format: ExportFormat) -> Self {
        Self {
            id: JobId::new(),
            owner,
            status: JobStatus::Pending,
            progress: 0,
            format,
            created_at: Utc::now(),
            error: None,
        }
    }

    /// Whether `user` may see this job.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Client-facing projection.
    pub fn view(&self) -> ExportJobView {
        ExportJobView {
            id: self.id,
            status: self.status,
            progress: self.progress,
            format: self.format,
            created_at: self.created_at,
            error: self.error.clone(),
        }
    }
}

/// Wire shape of an export job shared by the API and the CLI client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJobView {
    /// Job identifier.
    pub id: JobId,
    /// Current status.
    pub status: JobStatus,
    /// Progress percentage.
    pub progress: u8,
    /// Artifact format.
    pub format: ExportFormat,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
