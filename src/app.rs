use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::{future::Future, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::StoreHealth;
use crate::state::AppState;
use crate::users;

pub fn build_app(state: AppState) -> Router {
    let grpc = users::grpc_router(Arc::clone(&state.users));
    Router::new()
        .merge(users::router())
        .route("/health/live", get(|| async { "ok" }))
        .route("/health/ready", get(ready))
        .with_state(state)
        .merge(grpc)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

/// 200 while the user store is healthy, 503 while reconnecting or given up.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StoreHealth>) {
    let health = state.users.health();
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

pub async fn serve<F>(app: Router, addr: &str, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
