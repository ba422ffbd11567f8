//! CLI command definitions and dispatch.

pub mod export;
pub mod import;
pub mod login;

use std::time::Duration;

use clap::{Parser, Subcommand};

use noteflow_cli::{ApiClient, ClientError};

/// NoteFlow: notes export and import client
#[derive(Debug, Parser)]
#[command(name = "noteflow-cli", version, about, long_about = None)]
pub struct Cli {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:3000")]
    pub server: String,

    /// Bearer token from `login`
    #[arg(long, env = "NOTEFLOW_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Delay between export status checks, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub poll_interval_ms: u64,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and print a bearer token
    Login(login::LoginArgs),
    /// Export notes and download the result
    Export(export::ExportArgs),
    /// Import notes from a JSON file
    Import(import::ImportArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), ClientError> {
        match &self.command {
            Commands::Login(args) => login::execute(args, self.client()).await,
            Commands::Export(args) => {
                export::execute(args, self.authorized()?, self.poll_interval()).await
            }
            Commands::Import(args) => import::execute(args, self.authorized()?).await,
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(&self.server)
    }

    fn authorized(&self) -> Result<ApiClient, ClientError> {
        let token = self.token.as_deref().ok_or_else(|| {
            ClientError::Usage(
                "Not logged in. Run `noteflow-cli login` and set NOTEFLOW_TOKEN".to_string(),
            )
        })?;
        Ok(self.client().with_token(token))
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
