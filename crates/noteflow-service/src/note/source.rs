//! Read-only access to a user's notes for consumers outside the note
//! service, such as export rendering.

use async_trait::async_trait;

use noteflow_core::error::AppError;
use noteflow_core::types::UserId;
use noteflow_entity::note::Note;

/// Supplies the current notes of one owner, in insertion order.
#[async_trait]
pub trait NoteSource: Send + Sync + 'static {
    /// Returns every note owned by `owner`.
    async fn notes_for(&self, owner: UserId) -> Result<Vec<Note>, AppError>;
}
