//! Export job domain entities.

pub mod format;
pub mod model;
pub mod status;

pub use format::ExportFormat;
pub use model::{ExportJob, ExportJobView};
pub use status::JobStatus;
