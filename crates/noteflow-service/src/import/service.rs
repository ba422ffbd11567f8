//! Bulk creation of notes from an uploaded JSON array.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use noteflow_core::error::{AppError, ErrorKind};
use noteflow_entity::import::ImportReport;
use noteflow_entity::note::{CreateNote, Note};

use crate::context::RequestContext;
use crate::note::NoteStore;

/// Validates uploaded note arrays and stores the accepted elements.
#[derive(Debug, Clone)]
pub struct ImportService {
    store: Arc<NoteStore>,
}

impl ImportService {
    /// Creates a new import service writing into `store`.
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }

    /// Imports the notes in `payload` for the caller.
    ///
    /// The payload must be a JSON array. Elements without a non-empty
    /// string `title` and `body` are rejected individually; the rest become
    /// new notes owned by the caller with fresh ids and timestamps.
    pub async fn import(
        &self,
        ctx: &RequestContext,
        payload: &[u8],
    ) -> Result<ImportReport, AppError> {
        let parsed: Value = serde_json::from_slice(payload)
            .map_err(|e| AppError::with_source(ErrorKind::Validation, "Invalid JSON file", e))?;
        let Value::Array(elements) = parsed else {
            return Err(AppError::validation("Invalid file format"));
        };

        let mut report = ImportReport::default();
        let mut accepted = Vec::new();

        for (index, element) in elements.iter().enumerate() {
            match parse_element(element) {
                Some(data) => accepted.push(Note::new(ctx.user_id, data)),
                None => {
                    debug!(index, "Rejected import element");
                    report.reject(index);
                }
            }
        }

        report.created = accepted.len();
        self.store.insert_many(accepted).await;

        info!(
            user_id = %ctx.user_id,
            created = report.created,
            rejected = report.rejected,
            "Import finished"
        );
        Ok(report)
    }
}

fn parse_element(element: &Value) -> Option<CreateNote> {
    let title = non_empty_str(element.get("title"))?;
    let body = non_empty_str(element.get("body"))?;
    let tags = element
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(CreateNote {
        title: title.to_string(),
        body: body.to_string(),
        tags,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteflow_core::types::UserId;

    fn setup() -> (ImportService, Arc<NoteStore>, RequestContext) {
        let store = Arc::new(NoteStore::new());
        let ctx = RequestContext::new(UserId::new(), "ada".into());
        (ImportService::new(store.clone()), store, ctx)
    }

    #[tokio::test]
    async fn test_mixed_array() {
        let (service, store, ctx) = setup();
        let payload = br#"[{"title":"A","body":"x","tags":["t"]},{"title":"B"}]"#;
        let report = service.import(&ctx, payload).await.expect("import");

        assert_eq!(report.created, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.errors, vec!["Note at index 1: Missing required fields"]);

        let notes = store.list(ctx.user_id).await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].tags, vec!["t".to_string()]);
        assert!(notes[0].created.is_some());
    }

    #[tokio::test]
    async fn test_empty_strings_rejected() {
        let (service, _, ctx) = setup();
        let report = service
            .import(&ctx, br#"[{"title":"","body":"x"},{"title":"y","body":""}]"#)
            .await
            .expect("import");
        assert_eq!(report.created, 0);
        assert_eq!(report.rejected, 2);
    }

    #[tokio::test]
    async fn test_non_array_is_invalid_format() {
        let (service, _, ctx) = setup();
        let err = service.import(&ctx, br#"{"title":"A"}"#).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(err.message, "Invalid file format");
    }

    #[tokio::test]
    async fn test_garbage_is_invalid_json() {
        let (service, _, ctx) = setup();
        let err = service.import(&ctx, b"not json").await.unwrap_err();
        assert_eq!(err.message, "Invalid JSON file");
    }
}
