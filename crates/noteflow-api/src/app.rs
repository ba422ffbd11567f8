//! Application builder: wires services, router, and middleware into an
//! Axum app and runs it.

use std::future::Future;
use std::sync::Arc;

use axum::Router;

use noteflow_auth::jwt::{JwtDecoder, JwtEncoder};
use noteflow_auth::password::{PasswordHasher, PasswordValidator};
use noteflow_core::config::AppConfig;
use noteflow_core::error::AppError;
use noteflow_core::result::AppResult;
use noteflow_service::{ImportService, NoteService, NoteSource, NoteStore, UserService};
use noteflow_worker::{ExportJobStore, ExportService, ExportTimeline, ProgressScheduler};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Constructs every service from configuration.
///
/// Stores start empty. The configured seed user is created when enabled.
pub fn build_state(config: AppConfig) -> AppResult<AppState> {
    // ── Step 1: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 2: Initialize stores ────────────────────────────────
    let note_store = Arc::new(NoteStore::new());
    let timeline = ExportTimeline::from_config(&config.export);
    let job_store = Arc::new(ExportJobStore::new(timeline));
    tracing::info!(
        start_delay_ms = config.export.start_delay_ms,
        tick_interval_ms = config.export.tick_interval_ms,
        steps = timeline.steps_to_complete(),
        "Export timeline configured"
    );

    // ── Step 3: Initialize services ──────────────────────────────
    let user_service = Arc::new(UserService::new(
        password_hasher,
        password_validator,
        jwt_encoder,
    ));
    if config.auth.seed_user.enabled {
        user_service.seed(&config.auth.seed_user.username, &config.auth.seed_user.password)?;
    }

    let note_service = Arc::new(NoteService::new(Arc::clone(&note_store)));
    let import_service = Arc::new(ImportService::new(Arc::clone(&note_store)));

    let scheduler = ProgressScheduler::new(Arc::clone(&job_store));
    let export_service = Arc::new(ExportService::new(
        job_store,
        scheduler,
        note_store as Arc<dyn NoteSource>,
    ));

    Ok(AppState {
        config: Arc::new(config),
        jwt_decoder,
        user_service,
        note_service,
        import_service,
        export_service,
    })
}

/// Runs the NoteFlow server until `shutdown` resolves.
///
/// After the listener stops, outstanding export advancement is cancelled
/// and the affected jobs are marked failed.
pub async fn run_server<F>(config: AppConfig, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("Starting NoteFlow v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.server.bind_address();
    let state = build_state(config)?;
    let scheduler = state.export_service.scheduler().clone();
    let app = build_app(state);

    // ── Step 4: Bind and serve ───────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("NoteFlow server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Stop export advancement ──────────────────────────
    scheduler.shutdown().await;

    tracing::info!("NoteFlow server shut down gracefully");
    Ok(())
}
