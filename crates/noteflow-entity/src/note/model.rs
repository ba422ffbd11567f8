//! Note entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use noteflow_core::types::{NoteId, UserId};

/// A single note owned by one user.
///
/// Field order is the order exported JSON presents, so reordering fields
/// changes the export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note identifier.
    pub id: NoteId,
    /// Owning user.
    pub user_id: UserId,
    /// Title, may be empty.
    #[serde(default)]
    pub title: String,
    /// Free-form body text.
    #[serde(default)]
    pub body: String,
    /// Tags attached to the note.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time. Absent only on notes read back from old exports.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Time of the last update.
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Note {
    /// Build a fresh note stamped with the current time.
    pub fn new(user_id: UserId, data: CreateNote) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            user_id,
            title: data.title,
            body: data.body,
            tags: data.tags,
            created: Some(now),
            last_modified: Some(now),
        }
    }

    /// Apply a partial update. Only provided fields change; the
    /// modification time is always bumped.
    pub fn apply(&mut self, update: UpdateNote) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.last_modified = Some(Utc::now());
    }

    /// Case-insensitive substring match against title or body.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.body.to_lowercase().contains(needle)
    }

    /// Whether the note carries at least one of `tags`.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| self.tags.contains(t))
    }
}

/// Data required to create a new note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNote {
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Body.
    #[serde(default)]
    pub body: String,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for an existing note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNote {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub body: Option<String>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
}

/// Ordering applied when listing notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteSort {
    /// Newest creation time first.
    Created,
    /// Title ascending, case-insensitive.
    Title,
    /// Most recently modified first.
    #[default]
    LastModified,
}

impl NoteSort {
    /// Parse a `sortBy` query value. Unknown values fall back to
    /// [`NoteSort::LastModified`].
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("created") => Self::Created,
            Some("title") => Self::Title,
            _ => Self::LastModified,
        }
    }
}
