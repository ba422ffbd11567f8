//! Export artifact formats.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format of an export job, fixed at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON array of notes.
    #[default]
    Json,
    /// Paginated PDF document.
    Pdf,
}

impl ExportFormat {
    /// Lenient parse: anything other than `pdf` (case-insensitive) is JSON.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("pdf") => Self::Pdf,
            _ => Self::Json,
        }
    }

    /// Return the format as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pdf => "pdf",
        }
    }

    /// Download filename for artifacts of this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Json => "notes-export.json",
            Self::Pdf => "notes-export.pdf",
        }
    }

    /// MIME type for artifacts of this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_falls_back_to_json() {
        assert_eq!(ExportFormat::parse_lenient(Some("xml")), ExportFormat::Json);
        assert_eq!(ExportFormat::parse_lenient(None), ExportFormat::Json);
        assert_eq!(ExportFormat::parse_lenient(Some("PDF")), ExportFormat::Pdf);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportFormat::Json.file_name(), "notes-export.json");
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }
}
