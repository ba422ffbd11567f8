//! Export artifact rendering.
//!
//! Artifacts are rendered from the owner's notes at fetch time. JSON is
//! small enough to buffer; PDF documents are built in memory and then
//! serialized on a blocking thread into a pipe the response body reads.

pub mod json;
pub mod pdf;

use std::io;

use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::io::AsyncReadExt;
use tokio_util::io::{ReaderStream, StreamReader, SyncIoBridge};

use noteflow_core::error::AppError;
use noteflow_entity::export::ExportFormat;
use noteflow_entity::note::Note;

/// Size of the in-memory pipe between the PDF writer and the response.
const PIPE_CAPACITY: usize = 64 * 1024;

/// Body of a rendered artifact.
pub enum ArtifactBody {
    /// Fully serialized bytes.
    Buffered(Bytes),
    /// A finished document awaiting serialization.
    Document(Box<lopdf::Document>),
}

impl std::fmt::Debug for ArtifactBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buffered(bytes) => f.debug_tuple("Buffered").field(&bytes.len()).finish(),
            Self::Document(_) => f.write_str("Document"),
        }
    }
}

/// A downloadable export artifact.
#[derive(Debug)]
pub struct ExportArtifact {
    /// Format the artifact was rendered in.
    pub format: ExportFormat,
    /// Artifact content.
    pub body: ArtifactBody,
}

impl ExportArtifact {
    /// Renders `notes` in `format`.
    ///
    /// Any failure while building the document is an `Internal` error.
    pub fn render(format: ExportFormat, notes: &[Note]) -> Result<Self, AppError> {
        let body = match format {
            ExportFormat::Json => ArtifactBody::Buffered(Bytes::from(json::render(notes)?)),
            ExportFormat::Pdf => ArtifactBody::Document(Box::new(pdf::render(notes)?)),
        };
        Ok(Self { format, body })
    }

    /// Download filename.
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    /// MIME type.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// Streams the artifact bytes.
    ///
    /// Must be called from within a tokio runtime. A serialization error
    /// after streaming has started is logged and truncates the stream.
    pub fn into_stream(self) -> BoxStream<'static, io::Result<Bytes>> {
        match self.body {
            ArtifactBody::Buffered(bytes) => stream::once(async move { Ok(bytes) }).boxed(),
            ArtifactBody::Document(mut doc) => {
                let (writer, reader) = tokio::io::duplex(PIPE_CAPACITY);
                let mut bridge = SyncIoBridge::new(writer);
                tokio::task::spawn_blocking(move || {
                    if let Err(e) = doc.save_to(&mut bridge) {
                        tracing::error!("Failed to serialize PDF export: {}", e);
                    }
                });
                ReaderStream::new(reader).boxed()
            }
        }
    }

    /// Collects the whole artifact into memory.
    pub async fn into_bytes(self) -> Result<Vec<u8>, AppError> {
        if let ArtifactBody::Buffered(bytes) = &self.body {
            return Ok(bytes.to_vec());
        }
        let mut reader = StreamReader::new(self.into_stream());
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await?;
        Ok(out)
    }
}
