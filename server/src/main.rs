use anyhow::Context;
use clap::Parser;
use supplylink_server::config::Cli;
use supplylink_server::{demo, serve, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let state = AppState::in_memory();

    if cli.seed_demo {
        let count = demo::seed_accounts(&state).context("seeding demo accounts")?;
        tracing::info!(count, password = demo::DEMO_PASSWORD, "demo accounts ready");
    }

    let addr = cli.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    serve(listener, state, cli.cors()).await.context("server failed")?;
    Ok(())
}
