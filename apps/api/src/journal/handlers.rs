//! Axum route handlers for journal entries.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::journal::service;
use crate::models::entry::{EntryRequest, JournalEntry};
use crate::routes::{json_body, ApiResponse};
use crate::state::AppState;

/// POST /api/v1/entries
pub async fn handle_create_entry(
    State(state): State<AppState>,
    body: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<JournalEntry>>), AppError> {
    let request = json_body(body)?;
    let entry = service::create_entry(state.store.as_ref(), state.user_id(), request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(entry))))
}

/// GET /api/v1/entries
pub async fn handle_list_entries(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<JournalEntry>>>, AppError> {
    let entries = service::list_entries(state.store.as_ref(), state.user_id()).await?;
    Ok(Json(ApiResponse::data(entries)))
}

/// GET /api/v1/entries/:id
pub async fn handle_get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<JournalEntry>>, AppError> {
    let entry = service::get_entry(state.store.as_ref(), state.user_id(), &id).await?;
    Ok(Json(ApiResponse::data(entry)))
}

/// PUT /api/v1/entries/:id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<JournalEntry>>, AppError> {
    let request = json_body(body)?;
    let entry =
        service::update_entry(state.store.as_ref(), state.user_id(), &id, request).await?;
    Ok(Json(ApiResponse::data(entry)))
}

/// DELETE /api/v1/entries/:id
pub async fn handle_delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    service::delete_entry(state.store.as_ref(), state.user_id(), &id).await?;
    Ok(Json(ApiResponse::message("Entry deleted successfully")))
}
