//! richman server binary.

use anyhow::Result;
use clap::Parser;
use richman_server::api::{AppState, build_router};
use richman_server::cli::Cli;
use richman_server::session::SessionStore;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let store = SessionStore::new(
        cli.board.ruleset(),
        Duration::from_secs(cli.idle_timeout_secs),
    );

    // Idle sweep on a fixed schedule. It takes the same store lock as the
    // request handlers, so no session vanishes mid-operation.
    let sweeper = store.clone();
    let sweep_every = Duration::from_secs(cli.sweep_interval_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        ticker.tick().await; // the first tick completes immediately
        loop {
            ticker.tick().await;
            let evicted = sweeper.sweep(Instant::now());
            if evicted > 0 {
                info!(evicted, remaining = sweeper.len(), "idle sweep done");
            }
        }
    });

    let app = build_router(AppState { store });
    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, board = ?cli.board, "richman server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
