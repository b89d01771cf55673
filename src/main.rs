use std::net::SocketAddr;

use nba_player_api::{
    app,
    config::Config,
    db::PlayerStore,
    error::StartupError,
    fetcher::PlayerScraper,
    seed,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run(Config::from_env()).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), StartupError> {
    tracing::info!("Connecting to database");
    let store = PlayerStore::connect(&config.database_url).await?;

    let source = PlayerScraper::new(config.source_url.as_str())?;
    seed::check_and_seed(&store, &source).await?;

    let app = app::router(store, config.enable_cors);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let cors = if config.enable_cors { "on" } else { "off" };
    tracing::info!("Starting server on {} (CORS {})", addr, cors);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
