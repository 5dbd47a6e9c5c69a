//! Axum route handlers for reflections, insights and the user stub.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::errors::AppError;
use crate::models::reflection::{Insights, Reflection, ReflectionRequest};
use crate::models::user::{CreateUserRequest, User};
use crate::reflection::generator::{
    generate_reflection, list_reflections, list_reflections_by_entry,
};
use crate::reflection::insights::get_insights;
use crate::routes::{json_body, ApiResponse};
use crate::state::AppState;

/// POST /api/v1/reflect
pub async fn handle_reflect(
    State(state): State<AppState>,
    body: Result<Json<ReflectionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Reflection>>), AppError> {
    let request = json_body(body)?;
    let reflection = generate_reflection(
        state.store.as_ref(),
        state.model.as_ref(),
        state.user_id(),
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(reflection))))
}

/// GET /api/v1/reflections
pub async fn handle_list_reflections(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Reflection>>>, AppError> {
    let reflections = list_reflections(state.store.as_ref(), state.user_id()).await?;
    Ok(Json(ApiResponse::data(reflections)))
}

/// GET /api/v1/entries/:id/reflections
pub async fn handle_list_entry_reflections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Reflection>>>, AppError> {
    let reflections =
        list_reflections_by_entry(state.store.as_ref(), state.user_id(), &id).await?;
    Ok(Json(ApiResponse::data(reflections)))
}

/// GET /api/v1/insights
pub async fn handle_insights(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Insights>>, AppError> {
    let insights = get_insights(state.store.as_ref(), state.user_id()).await?;
    Ok(Json(ApiResponse::data(insights)))
}

/// POST /api/v1/user
///
/// Echoes the submitted profile back as the single configured user.
/// Nothing is stored.
pub async fn handle_create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let request = json_body(body)?;
    let user = User {
        id: state.user_id().to_string(),
        name: request.name,
        email: request.email,
        created_at: Utc::now(),
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(user).with_message("User created successfully (MVP hardcoded)")),
    ))
}
