use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Args;
use schoolhub_server::config::{DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};
use schoolhub_server::{DbConfig, ServerConfig};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Only allow browser requests from localhost origins
    #[arg(long)]
    pub cors_localhost: bool,

    /// Keep records in process memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,
}

#[derive(Args, Debug)]
pub struct InitDbArgs {
    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

fn db_config(max_connections: u32) -> Result<DbConfig> {
    Ok(DbConfig::from_env()?.with_max_connections(max_connections))
}

pub async fn run_server(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        cors_permissive: !args.cors_localhost,
    };

    if args.in_memory {
        schoolhub_server::serve_in_memory(config).await?;
        return Ok(());
    }

    let db = db_config(args.max_connections)?;
    schoolhub_server::serve(db, config)
        .await
        .context("server failed")?;
    Ok(())
}

pub async fn init_db(args: InitDbArgs) -> Result<()> {
    let db = db_config(args.max_connections)?;
    schoolhub_server::init_storage(&db)
        .await
        .context("could not prepare database")?;
    Ok(())
}
