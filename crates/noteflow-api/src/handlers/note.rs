//! Note handlers: CRUD, search, and tag listing.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use noteflow_core::error::AppError;
use noteflow_core::types::NoteId;
use noteflow_entity::note::{CreateNote, Note, UpdateNote};
use noteflow_service::NoteQuery;

use crate::dto::request::NoteListParams;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// An id that does not parse cannot name a stored note.
fn parse_note_id(raw: &str) -> Result<NoteId, AppError> {
    raw.parse().map_err(|_| AppError::not_found("Note not found"))
}

/// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<NoteListParams>,
) -> Json<Vec<Note>> {
    let query = NoteQuery::from_params(
        params.search.as_deref(),
        params.tags.as_deref(),
        params.sort_by.as_deref(),
    );
    Json(state.note_service.list(auth.context(), &query).await)
}

/// GET /api/notes/tags
pub async fn list_tags(State(state): State<AppState>, auth: AuthUser) -> Json<Vec<String>> {
    Json(state.note_service.tags(auth.context()).await)
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Note>> {
    let id = parse_note_id(&id)?;
    let note = state.note_service.get(auth.context(), id).await?;
    Ok(Json(note))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNote>,
) -> (StatusCode, Json<Note>) {
    let note = state.note_service.create(auth.context(), req).await;
    (StatusCode::CREATED, Json(note))
}

/// PUT /api/notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateNote>,
) -> ApiResult<Json<Note>> {
    let id = parse_note_id(&id)?;
    let note = state.note_service.update(auth.context(), id, req).await?;
    Ok(Json(note))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_note_id(&id)?;
    state.note_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
