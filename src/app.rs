use std::net::SocketAddr;

use axum::{error_handling::HandleErrorLayer, middleware, routing::get, BoxError, Json, Router};
use serde_json::{json, Value};
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{articles, auth, categories, error::ApiError, state::AppState};

pub fn build_app(state: AppState) -> Router {
    let admin = Router::new()
        .route("/dashboard", get(dashboard))
        .merge(articles::handlers::admin_routes())
        .merge(categories::handlers::admin_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let api = Router::new()
        .merge(auth::router())
        .merge(articles::handlers::public_routes())
        .merge(categories::handlers::public_routes())
        .nest("/admin", admin);

    Router::new()
        .route("/ping", get(ping))
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(state.config.request_timeout()),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

async fn handle_timeout(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        ApiError::Timeout
    } else {
        ApiError::internal("Unhandled internal error", anyhow::anyhow!(err.to_string()))
    }
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

async fn dashboard() -> Json<Value> {
    Json(json!({ "message": "Welcome to the admin dashboard!" }))
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
