//! HTTP surface: each POST validates a request, then streams its run as
//! newline-delimited JSON.
//!
//! The response body pulls events from the engine one at a time, so a run
//! never gets ahead of the connection. When the client goes away the body
//! is dropped and the engine with it.

use std::time::Duration;

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures::{StreamExt, stream};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{Limits, ServerConfig};
use crate::error::InputError;
use crate::request::{MazeRequest, TspRequest};
use crate::stream::{NDJSON_CONTENT_TYPE, encode_line};
use crate::traits::SearchEvent;

#[derive(Debug, Clone)]
struct AppState {
    limits: Limits,
    event_delay: Duration,
}

/// Error answered before any event is streamed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Input(err) => err.to_string(),
            ApiError::Body(err) => err.body_text(),
        };
        warn!(error = %message, "rejecting search request");
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
    }
}

/// Builds the application router.
pub fn router(config: &ServerConfig) -> Router {
    let state = AppState {
        limits: config.limits,
        event_delay: config.event_delay,
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/maze", post(run_maze))
        .route("/api/tsp", post(run_tsp))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves on an already-bound listener until the process ends.
pub async fn serve(listener: TcpListener, config: &ServerConfig) -> std::io::Result<()> {
    let app = router(config);
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, delay = ?config.event_delay, "search server listening");
    }
    axum::serve(listener, app).await
}

async fn run_maze(
    State(state): State<AppState>,
    payload: Result<Json<MazeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let search = request.into_search(&state.limits)?;
    Ok(stream_response(search, state.event_delay))
}

async fn run_tsp(
    State(state): State<AppState>,
    payload: Result<Json<TspRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let search = request.into_search(&state.limits)?;
    Ok(stream_response(search, state.event_delay))
}

fn stream_response<I, E>(events: I, delay: Duration) -> Response
where
    I: Iterator<Item = E> + Send + 'static,
    E: SearchEvent + Send + 'static,
{
    let lines = stream::iter(events).then(move |event| async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        encode_line(&event).map(Bytes::from)
    });

    Response::builder()
        .header(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(lines))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
