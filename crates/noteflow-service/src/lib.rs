//! # noteflow-service
//!
//! Business logic service layer for NoteFlow. Each service owns or wraps
//! an in-memory store and implements the application-level use cases the
//! HTTP handlers call.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod import;
pub mod note;
pub mod user;

pub use context::RequestContext;
pub use import::ImportService;
pub use note::{NoteQuery, NoteService, NoteSource, NoteStore};
pub use user::{LoginOutcome, UserService};
