//! Route handlers organized by domain.

pub mod auth;
pub mod export;
pub mod health;
pub mod import;
pub mod note;
