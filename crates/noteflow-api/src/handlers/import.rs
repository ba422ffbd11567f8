//! Import handler: multipart JSON note upload.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use noteflow_core::error::AppError;
use noteflow_entity::import::ImportReport;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/import
///
/// Expects a multipart body with a `file` part holding a JSON array of
/// notes. Other parts are ignored.
pub async fn import_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ImportReport>> {
    let mut multipart = multipart.map_err(|_| AppError::validation("No file uploaded"))?;

    let mut payload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?;
            payload = Some(data);
            break;
        }
    }

    let payload = payload.ok_or_else(|| AppError::validation("No file uploaded"))?;
    let report = state.import_service.import(auth.context(), &payload).await?;

    tracing::info!(
        user_id = %auth.user_id,
        created = report.created,
        rejected = report.rejected,
        "Notes imported"
    );

    Ok(Json(report))
}
