//! # noteflow-entity
//!
//! Domain entity models for NoteFlow. Every struct in this crate is either
//! an in-memory record owned by one of the stores or a value object that
//! crosses the HTTP boundary. All entities derive `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`.

pub mod export;
pub mod import;
pub mod note;
pub mod user;
