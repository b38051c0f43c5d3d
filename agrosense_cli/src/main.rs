mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use agrosense_lib::{CachedClient, ClientConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "agrosense")]
#[command(about = "Manage parcels, sensors and control units of an AgroSense deployment")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL, including the /api prefix (overrides AGROSENSE_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (overrides AGROSENSE_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List parcels or show one
    Parcels(commands::parcels::ParcelsArgs),
    /// List sensors or show one
    Sensors(commands::sensors::SensorsArgs),
    /// List control units or show one
    ControlUnits(commands::control_units::ControlUnitsArgs),
    /// Create a record from a JSON object
    Create(commands::mutate::CreateArgs),
    /// Update a record from a JSON object
    Update(commands::mutate::UpdateArgs),
    /// Delete a record
    Delete(commands::mutate::DeleteArgs),
    /// Short option lists used when picking a parent record
    Lookup(commands::lookup::LookupArgs),
    /// Exchange credentials for a bearer token
    Login(commands::auth::LoginArgs),
    /// Revoke the current token
    Logout,
    /// Show the user the current token belongs to
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agrosense=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url)?;
    }
    if let Some(token) = &cli.token {
        config = config.with_token(token);
    }
    let client = CachedClient::from_config(&config);

    match &cli.command {
        Commands::Parcels(args) => commands::parcels::run(args, &client, format).await?,
        Commands::Sensors(args) => commands::sensors::run(args, &client, format).await?,
        Commands::ControlUnits(args) => {
            commands::control_units::run(args, &client, format).await?
        }
        Commands::Create(args) => commands::mutate::run_create(args, &client, format).await?,
        Commands::Update(args) => commands::mutate::run_update(args, &client, format).await?,
        Commands::Delete(args) => commands::mutate::run_delete(args, &client).await?,
        Commands::Lookup(args) => commands::lookup::run(args, &client, format).await?,
        Commands::Login(args) => commands::auth::run_login(args, &client).await?,
        Commands::Logout => commands::auth::run_logout(&client).await?,
        Commands::Whoami => commands::auth::run_whoami(&client, format).await?,
    }

    Ok(())
}
