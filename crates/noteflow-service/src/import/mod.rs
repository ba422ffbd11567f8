//! JSON note import.

pub mod service;

pub use service::ImportService;
