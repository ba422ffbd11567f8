//! Export job lifecycle for NoteFlow.
//!
//! This crate provides:
//! - An in-memory job store with ownership-checked reads
//! - The progress timeline and the scheduler that drives it on a timer
//! - JSON and PDF artifact renderers
//! - The export service the HTTP layer calls

pub mod render;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod timeline;

pub use render::ExportArtifact;
pub use scheduler::ProgressScheduler;
pub use service::ExportService;
pub use store::ExportJobStore;
pub use timeline::{ExportTimeline, StepOutcome};
