//! Admin back-office endpoint handlers
//!
//! CRUD over the five record kinds plus the activate operations. Writes
//! fail loudly to the admin caller and never retry; the display picks the
//! changes up on its next reload.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Json,
};
use tracing::{info, warn};

use super::{
    error::ApiError,
    responses::{ApiResponse, UploadResponse},
};
use crate::state::{AppState, ReloadReason};
use crate::store::{
    BackgroundImage, Campaign, GiftItem, NewBackground, NewCampaign, NewGiftItem, NewTheme,
    ThemeSettings,
};

// Campaigns

pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    Ok(Json(state.store.campaigns()?))
}

pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewCampaign>,
) -> Result<Json<Campaign>, ApiError> {
    Ok(Json(state.store.create_campaign(new)?))
}

pub async fn update_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(new): Json<NewCampaign>,
) -> Result<Json<Campaign>, ApiError> {
    Ok(Json(state.store.update_campaign(&id, new)?))
}

pub async fn delete_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.store.delete_campaign(&id)?;
    Ok(Json(ApiResponse::ok(format!("Campaign {} deleted", id))))
}

pub async fn activate_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.store.activate_campaign(&id)?;
    Ok(Json(ApiResponse::ok(format!("Campaign {} activated", id))))
}

// Themes

pub async fn list_themes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ThemeSettings>>, ApiError> {
    Ok(Json(state.store.themes()?))
}

pub async fn create_theme(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewTheme>,
) -> Result<Json<ThemeSettings>, ApiError> {
    Ok(Json(state.store.create_theme(new)?))
}

pub async fn update_theme(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(new): Json<NewTheme>,
) -> Result<Json<ThemeSettings>, ApiError> {
    Ok(Json(state.store.update_theme(&id, new)?))
}

pub async fn delete_theme(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.store.delete_theme(&id)?;
    Ok(Json(ApiResponse::ok(format!("Theme {} deleted", id))))
}

pub async fn activate_theme(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.store.activate_theme(&id)?;
    Ok(Json(ApiResponse::ok(format!("Theme {} activated", id))))
}

// Gift items

pub async fn list_gifts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GiftItem>>, ApiError> {
    Ok(Json(state.store.gifts()?))
}

pub async fn create_gift(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewGiftItem>,
) -> Result<Json<GiftItem>, ApiError> {
    Ok(Json(state.store.create_gift(new)?))
}

pub async fn update_gift(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(new): Json<NewGiftItem>,
) -> Result<Json<GiftItem>, ApiError> {
    Ok(Json(state.store.update_gift(&id, new)?))
}

pub async fn delete_gift(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.store.delete_gift(&id)?;
    Ok(Json(ApiResponse::ok(format!("Gift item {} deleted", id))))
}

// Backgrounds

pub async fn list_backgrounds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BackgroundImage>>, ApiError> {
    Ok(Json(state.store.backgrounds()?))
}

pub async fn create_background(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewBackground>,
) -> Result<Json<BackgroundImage>, ApiError> {
    Ok(Json(state.store.create_background(new)?))
}

/// Deleting a background removes its stored image too.
pub async fn delete_background(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let background = state.store.delete_background(&id)?;
    if !state.media.delete_by_url(&background.image_url) {
        warn!(
            "Background {} image was not in the media store: {}",
            id, background.image_url
        );
    }
    Ok(Json(ApiResponse::ok(format!("Background {} deleted", id))))
}

pub async fn activate_background(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.store.activate_background(&id)?;
    Ok(Json(ApiResponse::ok(format!("Background {} activated", id))))
}

pub async fn deactivate_backgrounds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.store.deactivate_backgrounds()?;
    Ok(Json(ApiResponse::ok("All backgrounds deactivated")))
}

// Media

/// Handle POST /admin/media/:name - store an uploaded image and return its
/// public URL.
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<UploadResponse> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");
    let url = state.media.upload(&name, content_type, body.to_vec());
    Json(UploadResponse { url })
}

// Screen control

/// Handle POST /admin/reload - push the current records to the display now
/// instead of waiting for the next scheduled refresh.
pub async fn force_reload(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    info!("Admin requested screen reload");
    state.request_reload(ReloadReason::Admin);
    Json(ApiResponse::ok("Screen reload requested"))
}
