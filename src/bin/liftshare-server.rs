// ABOUTME: LiftShare API server binary
// ABOUTME: Loads configuration, opens the database, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `LiftShare` API Server Binary
//!
//! Starts the workout publishing and challenge API on top of a `SQLite` store.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use liftshare_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    server::LiftShareServer,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "liftshare-server")]
#[command(about = "LiftShare API - workout publishing and challenge progress")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }

    info!("Starting LiftShare API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    info!("Database initialized: {}", config.database.url);

    let resources = Arc::new(ServerResources::new(database, config));
    let server = LiftShareServer::new(resources);

    if let Err(e) = server.run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
