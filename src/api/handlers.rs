//! Public display endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use tracing::debug;

use super::{
    error::ApiError,
    responses::{ChatRequest, ChatResponse, HealthResponse},
};
use crate::state::{AppState, ScreenSnapshot};

/// Handle GET /screen - Latest display frame for the rendering surface
pub async fn screen_handler(State(state): State<Arc<AppState>>) -> Json<ScreenSnapshot> {
    Json(state.latest_snapshot())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}

/// Handle POST /chat - Relay one visitor message to the course advisor.
/// Never fails from the visitor's point of view; failures become the
/// fallback reply.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    debug!("Chat message received ({} chars)", request.message.len());
    let reply = state.chat.advise(&request.message).await;
    Json(ChatResponse {
        reply,
        timestamp: Utc::now(),
    })
}

/// Handle GET /media/:name - Serve an uploaded image
pub async fn media_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let object = state.media.get(&name).ok_or(ApiError::MediaNotFound)?;
    Ok(([(header::CONTENT_TYPE, object.content_type)], object.bytes).into_response())
}
