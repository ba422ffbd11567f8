//! `import` command.

use std::path::PathBuf;

use clap::Args;

use noteflow_cli::{ApiClient, ClientError};

use crate::output;

/// Arguments for `import`
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file holding an array of notes
    pub file: PathBuf,
}

/// Execute `import`
pub async fn execute(args: &ImportArgs, client: ApiClient) -> Result<(), ClientError> {
    let contents = tokio::fs::read(&args.file).await?;
    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("notes.json");

    let report = client.import(file_name, contents).await?;

    output::print_success(&format!("Imported {} note(s)", report.created));
    if report.rejected > 0 {
        output::print_warning(&format!("Rejected {} note(s)", report.rejected));
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
    Ok(())
}
