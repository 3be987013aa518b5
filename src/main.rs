use anyhow::{Context, Result};
use epiboard::app::EpiBoard;
use epiboard::server::DashboardServer;
use epiboard::settings::Settings;
use epiboard::transport::Fetcher;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // Optional first argument: settings file path
    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref())
        .context("loading settings")?
        .with_env()
        .context("applying environment overrides")?;
    let base_url = settings.base_url().context("parsing base_url")?;
    let source = settings
        .data_source(base_url.as_ref())
        .context("resolving data source")?;

    let mut board = EpiBoard::new(Fetcher::new());
    if let Err(e) = board.load(&source).await {
        // The failed view still gets served so the page can show the error
        warn!("serving dashboard without data: {}", e);
    }

    let server = DashboardServer::start(
        &settings.bind_addr(),
        board.view(),
        settings.static_dir.clone(),
    )?;
    info!(url = %server.url(), "dashboard ready");

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!("shutting down");
    drop(server);
    Ok(())
}
