//! Note storage and queries.

pub mod service;
pub mod source;
pub mod store;

pub use service::{NoteQuery, NoteService};
pub use source::NoteSource;
pub use store::NoteStore;
