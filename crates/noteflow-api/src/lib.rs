//! # noteflow-api
//!
//! HTTP API layer for NoteFlow built on Axum.
//!
//! Provides the REST endpoints for accounts, notes, exports, and imports,
//! along with middleware (CORS, logging), extractors, DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use state::AppState;
