use anyhow::Context;
use cms_backend::{app, AppState, MIGRATOR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenvy::dotenv().is_err() {
        eprintln!("no .env file found, using process environment");
    }

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "cms_backend=debug,axum=info,tower_http=info".to_string());
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

    let app_state = AppState::init().await?;
    tracing::info!("connected to database");

    MIGRATOR
        .run(&app_state.db)
        .await
        .context("run database migrations")?;

    let host = app_state.config.host.clone();
    let port = app_state.config.port;
    let router = app::build_app(app_state.clone());
    app::serve(router, &host, port).await?;

    app_state.db.close().await;
    tracing::info!("database pool closed");
    Ok(())
}
