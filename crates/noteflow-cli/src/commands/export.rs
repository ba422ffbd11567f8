//! `export` command: create a job, poll it, save the artifact.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, ValueEnum};

use noteflow_cli::{ApiClient, ClientError, ExportPoller, ExportSession, PollOutcome};
use noteflow_entity::export::ExportFormat;

use crate::output;

/// Artifact format choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Pretty-printed JSON array
    Json,
    /// PDF document
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Pdf => ExportFormat::Pdf,
        }
    }
}

/// Arguments for `export`
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Artifact format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: FormatArg,
    /// Where to write the artifact (defaults to the server's file name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print the final job as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute `export`
pub async fn execute(
    args: &ExportArgs,
    client: ApiClient,
    poll_interval: Duration,
) -> Result<(), ClientError> {
    let format = ExportFormat::from(args.format);
    let job = client.create_export(format).await?;
    output::print_success(&format!("Export job {} queued ({})", job.id, job.format));

    let mut session = ExportSession::new(ExportPoller::new(poll_interval), Arc::new(client));
    let mut progress = session.begin(job.id).progress();

    let printer = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            if let Some(job) = progress.borrow_and_update().clone() {
                output::print_progress(&job);
            }
        }
    });

    let outcome = session.finish().await;
    printer.abort();

    match outcome {
        Some(PollOutcome::Completed { job, artifact }) => {
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(job.format.file_name()));
            tokio::fs::write(&path, &artifact).await?;
            output::print_success(&format!(
                "Saved {} bytes to {}",
                artifact.len(),
                path.display()
            ));
            if args.json {
                output::print_json(&job);
            }
            Ok(())
        }
        Some(PollOutcome::Failed { job, reason }) => {
            if args.json {
                output::print_json(&job);
            }
            Err(ClientError::Usage(format!("Export failed: {}", reason)))
        }
        Some(PollOutcome::Error(e)) => Err(e),
        Some(PollOutcome::Cancelled) | None => {
            Err(ClientError::Usage("Export polling was cancelled".to_string()))
        }
    }
}
