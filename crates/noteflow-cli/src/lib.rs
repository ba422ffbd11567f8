//! # noteflow-cli
//!
//! HTTP client for the NoteFlow API and the export job poller used by the
//! `noteflow-cli` binary.

pub mod client;
pub mod error;
pub mod poller;
pub mod session;

pub use client::ApiClient;
pub use error::ClientError;
pub use poller::{ExportBackend, ExportPoller, PollHandle, PollOutcome};
pub use session::ExportSession;
