use tokio::sync::watch;

mod app;
mod config;
mod db;
mod error;
mod state;
mod users;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "user_directory=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let (app_state, db) = state::AppState::init()?;

    // Run migrations if present
    if let Err(e) = sqlx::migrate!("./migrations").run(&db.pool().await).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let liveness = db.spawn_liveness(shutdown_rx);

    let addr = app_state.config.listen_addr();
    let app = app::build_app(app_state);
    app::serve(app, &addr, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for shutdown signal");
        }
        tracing::info!("shutdown signal received");
    })
    .await?;

    shutdown_tx.send_replace(true);
    if let Some(handle) = liveness {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "connection check task failed");
        }
    }
    db.close().await;
    tracing::info!("database connection closed");

    Ok(())
}
