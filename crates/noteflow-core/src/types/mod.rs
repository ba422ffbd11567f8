//! Core type definitions used across the NoteFlow workspace.

pub mod id;

pub use id::*;
