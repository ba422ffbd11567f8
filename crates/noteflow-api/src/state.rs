//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use noteflow_auth::jwt::JwtDecoder;
use noteflow_core::config::AppConfig;
use noteflow_service::{ImportService, NoteService, UserService};
use noteflow_worker::ExportService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub user_service: Arc<UserService>,
    /// Note CRUD and search
    pub note_service: Arc<NoteService>,
    /// JSON note import
    pub import_service: Arc<ImportService>,
    /// Export jobs and artifacts
    pub export_service: Arc<ExportService>,
}
