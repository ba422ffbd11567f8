//! In-memory note table.

use async_trait::async_trait;
use tokio::sync::RwLock;

use noteflow_core::error::AppError;
use noteflow_core::types::{NoteId, UserId};
use noteflow_entity::note::{Note, UpdateNote};

use super::source::NoteSource;

/// Holds every note in insertion order.
///
/// Reads filter by owner, so one user's notes are never returned for
/// another user's id.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: RwLock<Vec<Note>>,
}

impl NoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes owned by `owner`, in insertion order.
    pub async fn list(&self, owner: UserId) -> Vec<Note> {
        self.notes
            .read()
            .await
            .iter()
            .filter(|n| n.user_id == owner)
            .cloned()
            .collect()
    }

    /// A single note, if it exists and belongs to `owner`.
    pub async fn get(&self, owner: UserId, id: NoteId) -> Option<Note> {
        self.notes
            .read()
            .await
            .iter()
            .find(|n| n.id == id && n.user_id == owner)
            .cloned()
    }

    /// Appends notes.
    pub async fn insert_many(&self, notes: Vec<Note>) {
        self.notes.write().await.extend(notes);
    }

    /// Applies a partial update, returning the updated note.
    pub async fn update(&self, owner: UserId, id: NoteId, update: UpdateNote) -> Option<Note> {
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id && n.user_id == owner)?;
        note.apply(update);
        Some(note.clone())
    }

    /// Removes a note. Returns `false` if nothing matched.
    pub async fn remove(&self, owner: UserId, id: NoteId) -> bool {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.user_id == owner));
        notes.len() != before
    }
}

#[async_trait]
impl NoteSource for NoteStore {
    async fn notes_for(&self, owner: UserId) -> Result<Vec<Note>, AppError> {
        Ok(self.list(owner).await)
    }
}
