//! `login` command.

use clap::Args;

use noteflow_cli::{ApiClient, ClientError};

use crate::output;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute `login`
pub async fn execute(args: &LoginArgs, client: ApiClient) -> Result<(), ClientError> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| ClientError::Usage(format!("Input error: {}", e)))?,
    };

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| ClientError::Usage(format!("Input error: {}", e)))?,
    };

    let reply = client.login(&username, &password).await?;

    output::print_success(&format!("Logged in as '{}'", reply.user.username));
    output::print_kv("User ID", &reply.user.id.to_string());
    println!();
    println!("export NOTEFLOW_TOKEN={}", reply.token);
    Ok(())
}
