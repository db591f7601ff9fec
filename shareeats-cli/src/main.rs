//! shareeats CLI - runs the ShareEats HTTP gateway
//!
//! Loads `.env` from the working directory before parsing arguments, so
//! MONGODB_USERNAME, MONGODB_PASSWORD and PORT can live there.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "shareeats",
    author,
    version,
    about = "HTTP gateway for ShareEats food listings and requests"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }
    Ok(())
}
