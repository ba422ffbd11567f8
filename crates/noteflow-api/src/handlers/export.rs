//! Export handlers: job creation, status polling, and artifact download.

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use noteflow_core::error::AppError;
use noteflow_entity::export::ExportJobView;

use crate::dto::request::ExportRequest;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/export
///
/// The body is optional; see [`ExportRequest::format_from_body`].
pub async fn create_export(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> (StatusCode, Json<ExportJobView>) {
    let format = ExportRequest::format_from_body(&body);
    let job = state.export_service.create(auth.context(), format);
    (StatusCode::ACCEPTED, Json(job.view()))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ExportJobView>> {
    let job = state.export_service.get_status(auth.context(), &id)?;
    Ok(Json(job.view()))
}

/// GET /api/export/{id}
pub async fn download_export(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let artifact = state.export_service.get_artifact(auth.context(), &id).await?;

    let content_type = artifact.content_type();
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(artifact.into_stream()))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}
