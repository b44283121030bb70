use axum::{
    extract::{Json, State},
    response::IntoResponse,
};

use app_api::SaveDataRequest;

use crate::{errors::HttpError, state::HttpState};

pub async fn save_data(
    State(state): State<HttpState>,
    Json(req): Json<SaveDataRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::save_data(&state.context, req)?;
    Ok(Json(response))
}

pub async fn get_data(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::get_data(&state.context)?;
    Ok(Json(response))
}

pub async fn clear_data(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::clear_data(&state.context)?;
    Ok(Json(response))
}

pub async fn summary(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::summary(&state.context)?;
    Ok(Json(response))
}

/// Replays captured event logs into the store. Walks the filesystem, so it
/// runs off the async runtime.
pub async fn replay(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let context = state.context.clone();
    let stats = tokio::task::spawn_blocking(move || app_api::replay(&context))
        .await
        .map_err(|err| HttpError::internal(err.to_string()))??;
    Ok(Json(stats))
}

pub async fn not_found() -> HttpError {
    HttpError::not_found()
}
