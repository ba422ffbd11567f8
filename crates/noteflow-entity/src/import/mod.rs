//! Import result entities.

pub mod report;

pub use report::ImportReport;
