use anyhow::{Context, Result};
use clap::Parser;
use infrastructure::ServerConfig;
use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weight_server::{api, setup_app_state};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and per-RUN_MODE overrides
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// API Port (overrides the configured one)
    #[arg(long)]
    api_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,weight_server=debug,application=debug")
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!("⚖️ Weight Server Starting...");

    // 0. Configuration
    let mut config = ServerConfig::load(&args.config_dir)
        .with_context(|| format!("Failed to load configuration from {}", args.config_dir))?;
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }
    if let Some(port) = args.api_port {
        config.api_port = port;
    }

    // 1. Connect to Database
    info!("Connecting to database...");
    let db = infrastructure::database::connect(&config.database).await?;

    // 1.1 Run Migrations
    info!("Running database migrations...");
    Migrator::up(&db, None)
        .await
        .context("Failed to apply migrations")?;
    info!("✅ Migrations applied successfully");

    // 2. Initialize State
    let state = setup_app_state(db).await;

    // 3. Start API Server
    let app = api::create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    info!("🚀 API Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
