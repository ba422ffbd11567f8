//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use noteflow_entity::export::ExportFormat;

/// Registration request body.
///
/// Missing fields deserialize as empty strings so they are reported as
/// validation errors rather than body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Query parameters for `GET /api/notes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListParams {
    /// Case-insensitive substring of title or body.
    pub search: Option<String>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
    /// `created`, `title`, or anything else for last-modified order.
    pub sort_by: Option<String>,
}

/// Export request body. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    /// Requested format.
    #[serde(default)]
    pub format: Option<String>,
}

impl ExportRequest {
    /// Parses a raw body leniently. An empty or malformed body, a missing
    /// field, or an unknown value all select JSON.
    pub fn format_from_body(body: &[u8]) -> ExportFormat {
        let request: Self = serde_json::from_slice(body).unwrap_or_default();
        ExportFormat::parse_lenient(request.format.as_deref())
    }
}
