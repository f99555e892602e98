//! # REST API for Kid Management
//!
//! Endpoints for creating, retrieving, updating and deactivating kids.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::info;

use super::mappers::KidMapper;
use super::{error_response, ApiResult};
use crate::domain::commands::kid::{CreateKidCommand, UpdateKidCommand};
use crate::AppState;
use shared::{CreateKidRequest, Kid, KidListResponse, KidResponse, UpdateKidRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/kids", get(list_kids).post(create_kid))
        .route("/kids/:id", get(get_kid).patch(update_kid).delete(deactivate_kid))
}

pub async fn list_kids(State(state): State<AppState>) -> ApiResult<Json<KidListResponse>> {
    info!("GET /api/kids");

    let kids = state.kid_service.list_kids().await.map_err(error_response)?;
    Ok(Json(KidMapper::to_kid_list_dto(kids)))
}

pub async fn create_kid(
    State(state): State<AppState>,
    Json(request): Json<CreateKidRequest>,
) -> ApiResult<(StatusCode, Json<KidResponse>)> {
    info!("POST /api/kids - request: {:?}", request);

    let command = CreateKidCommand {
        name: request.name,
        color: request.color,
    };
    let kid = state.kid_service.create_kid(command).await.map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(KidMapper::to_kid_response(kid, "Kid created successfully")),
    ))
}

pub async fn get_kid(State(state): State<AppState>, Path(kid_id): Path<i64>) -> ApiResult<Json<Kid>> {
    info!("GET /api/kids/{}", kid_id);

    let kid = state.kid_service.get_kid(kid_id).await.map_err(error_response)?;
    Ok(Json(KidMapper::to_dto(kid)))
}

pub async fn update_kid(
    State(state): State<AppState>,
    Path(kid_id): Path<i64>,
    Json(request): Json<UpdateKidRequest>,
) -> ApiResult<Json<KidResponse>> {
    info!("PATCH /api/kids/{} - request: {:?}", kid_id, request);

    let command = UpdateKidCommand {
        name: request.name,
        color: request.color,
        current_list: request.current_list,
    };
    let kid = state
        .kid_service
        .update_kid(kid_id, command)
        .await
        .map_err(error_response)?;
    Ok(Json(KidMapper::to_kid_response(kid, "Kid updated successfully")))
}

pub async fn deactivate_kid(
    State(state): State<AppState>,
    Path(kid_id): Path<i64>,
) -> ApiResult<Json<KidResponse>> {
    info!("DELETE /api/kids/{}", kid_id);

    let kid = state.kid_service.deactivate_kid(kid_id).await.map_err(error_response)?;
    Ok(Json(KidMapper::to_kid_response(kid, "Kid deactivated successfully")))
}
