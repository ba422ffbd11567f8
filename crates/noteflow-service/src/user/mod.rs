//! Registration, login, and user lookup.

pub mod service;

pub use service::{LoginOutcome, UserService};
