pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use client::ApiClient;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Portfolio CLI - check, exercise and seed a running Portfolio API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "PORTFOLIO_API_URL", default_value = "http://127.0.0.1:8001", help = "Base URL of the API server")]
    pub url: String,

    #[arg(long, global = true, env = "ADMIN_TOKEN", hide_env_values = true, help = "Token sent as X-Admin-Token on admin routes")]
    pub admin_token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check the API root and health endpoints")]
    Ping,

    #[command(about = "Run an end-to-end check against every resource (writes test data)")]
    Smoke {
        #[arg(long, help = "Send writes through /api/admin with the admin token")]
        admin: bool,
    },

    #[command(about = "Load a YAML or JSON seed file into empty resources")]
    Seed {
        #[arg(help = "Seed file path")]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.url, cli.admin_token.clone())?;

    match cli.command {
        Commands::Ping => commands::ping::handle(&client, output_format).await,
        Commands::Smoke { admin } => commands::smoke::handle(&client, admin, output_format).await,
        Commands::Seed { file } => commands::seed::handle(&client, &file, output_format).await,
    }
}
