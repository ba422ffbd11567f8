//! JSON export rendering.

use noteflow_core::error::AppError;
use noteflow_entity::note::Note;

/// Pretty-prints `notes` as a JSON array with two-space indentation.
pub fn render(notes: &[Note]) -> Result<Vec<u8>, AppError> {
    serde_json::to_vec_pretty(notes)
        .map_err(|e| AppError::internal(format!("Failed to render JSON export: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_empty_array() {
        assert_eq!(render(&[]).expect("render"), b"[]");
    }
}
