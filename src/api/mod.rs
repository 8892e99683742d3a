//! HTTP API module
//!
//! Public display routes plus the token-gated admin back office.

pub mod admin;
pub mod error;
pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use admin::*;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route("/campaigns/:id", put(update_campaign).delete(delete_campaign))
        .route("/campaigns/:id/activate", post(activate_campaign))
        .route("/themes", get(list_themes).post(create_theme))
        .route("/themes/:id", put(update_theme).delete(delete_theme))
        .route("/themes/:id/activate", post(activate_theme))
        .route("/gifts", get(list_gifts).post(create_gift))
        .route("/gifts/:id", put(update_gift).delete(delete_gift))
        .route("/backgrounds", get(list_backgrounds).post(create_background))
        .route("/backgrounds/:id", delete(delete_background))
        .route("/backgrounds/:id/activate", post(activate_background))
        .route("/backgrounds/deactivate", post(deactivate_backgrounds))
        .route("/media/:name", post(upload_media))
        .route("/reload", post(force_reload))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_admin,
        ));

    Router::new()
        .route("/screen", get(screen_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/media/:name", get(media_handler))
        .nest("/admin", admin)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bearer-token gate for the admin routes. With no token configured the
/// gate is open (warned about at startup).
async fn require_admin(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(expected) = &state.settings.admin_token {
        let supplied = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if supplied != Some(expected.as_str()) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }
    next.run(req).await
}
