use crate::apis::TabSource;
use crate::pipeline::query::{FilterSelection, Selection};
use crate::pipeline::schedule::PastShowPolicy;
use crate::pipeline::state::ScheduleBoard;
use crate::pipeline::{local_today, refresh};
use crate::presentation::ShowsPage;
use axum::{
    extract::Query,
    http::Method,
    response::{IntoResponse, Json},
    routing::get,
    Extension, Router,
};
use hyper::Server;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TabSource>,
    pub policy: PastShowPolicy,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShowsQuery {
    pub month: Option<String>,
    pub city: Option<String>,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "lh-schedule",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Fresh load cycle per request; a dropped request drops its fetches
async fn shows(
    Extension(state): Extension<AppState>,
    Query(query): Query<ShowsQuery>,
) -> impl IntoResponse {
    let mut board = ScheduleBoard::new(state.policy);
    board.set_selection(FilterSelection::new(
        Selection::from_option(query.month.as_deref()),
        Selection::from_option(query.city.as_deref()),
    ));
    let cancel = CancellationToken::new();
    refresh(&mut board, state.source.as_ref(), &cancel, local_today()).await;
    Json(ShowsPage::from_board(&board))
}

pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/shows", get(shows))
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port; stops on Ctrl-C
pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_server(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Schedule server listening on {}", addr);
    println!("🚀 HTTP server running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");
    println!("🎭 Shows:        http://localhost:{port}/api/shows");

    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
