//! Import outcome summary.

use serde::{Deserialize, Serialize};

/// Counts and per-element messages from one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Number of notes created.
    pub created: usize,
    /// Number of elements rejected.
    pub rejected: usize,
    /// One message per rejected element; omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Record a rejected element at `index`.
    pub fn reject(&mut self, index: usize) {
        self.rejected += 1;
        self.errors
            .push(format!("Note at index {index}: Missing required fields"));
    }
}
