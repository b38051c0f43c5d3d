//! Session subcommands: `login`, `logout` and `whoami`.

use anyhow::{bail, Result};
use agrosense_lib::types::LoginCredentials;
use agrosense_lib::CachedClient;
use clap::Args;

use crate::output::OutputFormat;

#[derive(Args)]
pub struct LoginArgs {
    /// Email or username
    #[arg(long)]
    pub login: String,

    /// Password (falls back to AGROSENSE_PASSWORD)
    #[arg(long, env = "AGROSENSE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Prints the issued token on stdout so it can be captured into
/// `AGROSENSE_API_TOKEN`.
pub async fn run_login(args: &LoginArgs, client: &CachedClient) -> Result<()> {
    if args.login.trim().is_empty() || args.password.is_empty() {
        bail!("login and password are required");
    }
    let credentials = LoginCredentials {
        login: args.login.trim().to_string(),
        password: args.password.clone(),
    };
    let session = client.login(&credentials).await?;
    eprintln!("Logged in as {} (id {})", session.user.name, session.user.id);
    println!("{}", session.token);
    Ok(())
}

pub async fn run_logout(client: &CachedClient) -> Result<()> {
    ensure_token(client)?;
    client.logout().await;
    eprintln!("Logged out");
    Ok(())
}

pub async fn run_whoami(client: &CachedClient, format: OutputFormat) -> Result<()> {
    ensure_token(client)?;
    let user = client.profile().await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
        _ => {
            println!("{} (id {})", user.name, user.id);
            if let Some(email) = &user.email {
                println!("email: {}", email);
            }
            if !user.roles.is_empty() {
                println!("roles: {}", user.roles.join(", "));
            }
        }
    }
    Ok(())
}

fn ensure_token(client: &CachedClient) -> Result<()> {
    if client.inner().token().is_none() {
        bail!("no token configured; set AGROSENSE_API_TOKEN or pass --token");
    }
    Ok(())
}
