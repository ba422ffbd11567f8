//! Note CRUD, search, and tag listing for the authenticated user.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use noteflow_core::error::AppError;
use noteflow_core::types::NoteId;
use noteflow_entity::note::{CreateNote, Note, NoteSort, UpdateNote};

use crate::context::RequestContext;

use super::store::NoteStore;

/// Listing filters. Empty fields apply no filtering.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    /// Case-insensitive substring matched against title or body.
    pub search: Option<String>,
    /// Keep notes carrying any of these tags.
    pub tags: Vec<String>,
    /// Result ordering.
    pub sort: NoteSort,
}

impl NoteQuery {
    /// Builds a query from raw `search`, comma-separated `tags`, and
    /// `sortBy` query values.
    pub fn from_params(search: Option<&str>, tags: Option<&str>, sort_by: Option<&str>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()).map(str::to_lowercase),
            tags: tags
                .map(|t| {
                    t.split(',')
                        .filter(|tag| !tag.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            sort: NoteSort::parse(sort_by),
        }
    }
}

/// Manages the caller's notes.
#[derive(Debug, Clone)]
pub struct NoteService {
    store: Arc<NoteStore>,
}

impl NoteService {
    /// Creates a new note service over `store`.
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }

    /// The underlying store, shared with export rendering and imports.
    pub fn store(&self) -> &Arc<NoteStore> {
        &self.store
    }

    /// Lists the caller's notes after filtering and sorting.
    pub async fn list(&self, ctx: &RequestContext, query: &NoteQuery) -> Vec<Note> {
        let mut notes = self.store.list(ctx.user_id).await;

        if let Some(needle) = &query.search {
            notes.retain(|n| n.matches_search(needle));
        }
        if !query.tags.is_empty() {
            notes.retain(|n| n.has_any_tag(&query.tags));
        }

        match query.sort {
            NoteSort::Created => notes.sort_by(|a, b| newest_first(a.created, b.created)),
            NoteSort::Title => notes.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.title.cmp(&b.title))
            }),
            NoteSort::LastModified => {
                notes.sort_by(|a, b| newest_first(a.last_modified, b.last_modified))
            }
        }
        notes
    }

    /// Distinct tags across the caller's notes, in first-seen order.
    pub async fn tags(&self, ctx: &RequestContext) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut tags = Vec::new();
        for note in self.store.list(ctx.user_id).await {
            for tag in note.tags {
                if seen.insert(tag.clone()) {
                    tags.push(tag);
                }
            }
        }
        tags
    }

    /// Fetches one of the caller's notes.
    pub async fn get(&self, ctx: &RequestContext, id: NoteId) -> Result<Note, AppError> {
        self.store
            .get(ctx.user_id, id)
            .await
            .ok_or_else(|| AppError::not_found("Note not found"))
    }

    /// Creates a note owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, data: CreateNote) -> Note {
        let note = Note::new(ctx.user_id, data);
        self.store.insert_many(vec![note.clone()]).await;
        info!(note_id = %note.id, user_id = %ctx.user_id, "Note created");
        note
    }

    /// Applies a partial update to one of the caller's notes.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: NoteId,
        update: UpdateNote,
    ) -> Result<Note, AppError> {
        self.store
            .update(ctx.user_id, id, update)
            .await
            .ok_or_else(|| AppError::not_found("Note not found"))
    }

    /// Deletes one of the caller's notes.
    pub async fn delete(&self, ctx: &RequestContext, id: NoteId) -> Result<(), AppError> {
        if self.store.remove(ctx.user_id, id).await {
            info!(note_id = %id, user_id = %ctx.user_id, "Note deleted");
            Ok(())
        } else {
            Err(AppError::not_found("Note not found"))
        }
    }
}

fn newest_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    // `None` sorts below any `Some`, so reversing puts undated notes last.
    b.cmp(&a)
}
