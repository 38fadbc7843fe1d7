use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use chess_bot::health::HealthTracker;
use chess_bot::networking::{BotApi, LichessClient};
use chess_bot::ratings::{self, RatingBoard};
use chess_bot::{status, BotConfig, Dispatcher};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = BotConfig::parse();
    let api: Arc<dyn BotApi> = Arc::new(LichessClient::new(&config.base_url, &config.token)?);

    // Token check; games name players by account id
    let account = api
        .account()
        .await
        .context("cannot reach the account endpoint, check LICHESS_TOKEN")?;
    info!(username = %account.username, id = %account.id, "connected");
    let player_id = account.player_id(&config.username)?.to_string();
    config.username = player_id;

    match api.upgrade_to_bot().await {
        Ok(()) => info!("bot account upgrade successful"),
        Err(err) => info!(error = %err, "bot account upgrade failed, the account may already be a bot"),
    }

    let health = Arc::new(HealthTracker::default());
    let board = Arc::new(RatingBoard::default());
    if let Err(err) = ratings::refresh(api.as_ref(), &config.username, &board).await {
        warn!(error = %err, "initial rating fetch failed");
    }

    let dispatcher = Dispatcher::new(Arc::clone(&api), config.settings(), Arc::clone(&health));

    // Status server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind status server to {addr}"))?;
    let app = status::router(Arc::clone(&dispatcher), Arc::clone(&board));
    info!(%addr, "status server listening");
    let server = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!(error = %err, "status server stopped");
        }
    });

    let refresher = tokio::spawn(ratings::run_refresh_loop(
        Arc::clone(&api),
        config.username.clone(),
        Arc::clone(&board),
        Arc::clone(&health),
        config.rating_refresh(),
    ));

    let (events, seeking) = dispatcher.start();
    info!(depth = config.depth, rated = config.rated, "bot running");

    tokio::signal::ctrl_c().await.context("cannot listen for Ctrl-C")?;
    info!("shutting down");

    dispatcher.shutdown();
    for task in [events, seeking, refresher, server] {
        task.abort();
    }
    Ok(())
}
