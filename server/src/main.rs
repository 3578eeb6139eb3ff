use anyhow::Result;
use clap::Parser;
use server::{build_app, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Catalog snapshot path (.json/.jsonl file or directory of them)
    #[arg(long, default_value = "./catalog")]
    catalog: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // Build the first model before serving; a missing catalog fails startup.
    let state = AppState::new(args.catalog.clone());
    let items = state.recommender.refresh(state.catalog.as_ref())?;
    tracing::info!(items, catalog = %args.catalog, "initial model built");

    let app = build_app(state);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
