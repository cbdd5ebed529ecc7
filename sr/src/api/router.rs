//! Route table and server runner

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use eyre::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::api::{assets, handlers, AppState};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/solicitud", post(handlers::submit))
        .route("/solicitud", post(handlers::submit))
        .route("/solicitudes", get(handlers::list))
        .route("/solicitudes.json", get(handlers::list))
        .route("/export", get(handlers::export))
        .route("/decidir", post(handlers::decide))
        .route("/login", post(handlers::login))
        .fallback(assets::static_handler)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(axum::middleware::from_fn(logging_middleware))
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.context("HTTP server terminated")?;
    Ok(())
}

async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    if status.is_client_error() || status.is_server_error() {
        warn!(%method, path, status = status.as_u16(), duration_ms, "request rejected");
    } else {
        debug!(%method, path, status = status.as_u16(), duration_ms, "request");
    }
    response
}
