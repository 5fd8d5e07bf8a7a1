//! schoolhub CLI - runs the school records HTTP service
//!
//! Reads `DB_URL` from the environment (or a `.env` file in the working
//! directory) and serves the `/schools` API.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod server;
mod tracing_setup;

use server::{InitDbArgs, ServeArgs};
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "schoolhub",
    author,
    version,
    about = "School records service with proximity-sorted listing"
)]
struct Cli {
    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Check database connectivity and create the schools table, then exit
    InitDb(InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables win over it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug })?;

    let result = match cli.command {
        Commands::Serve(args) => server::run_server(args).await,
        Commands::InitDb(args) => server::init_db(args).await,
    };

    if let Err(err) = &result {
        tracing::error!("{:#}", err);
    }
    result
}
