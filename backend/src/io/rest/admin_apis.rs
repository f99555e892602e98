//! # REST API for Caregiver Actions
//!
//! List rotation and manual point awards.

use axum::{extract::State, response::Json, routing::post, Router};
use tracing::info;

use super::mappers::KidMapper;
use super::{error_response, ApiResult};
use crate::domain::commands::kid::AwardPointsCommand;
use crate::AppState;
use shared::{AwardPointsRequest, KidResponse, SwitchListsResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/switch-lists", post(switch_lists))
        .route("/admin/award-points", post(award_points))
}

pub async fn switch_lists(State(state): State<AppState>) -> ApiResult<Json<SwitchListsResponse>> {
    info!("POST /api/admin/switch-lists");

    let kids = state.kid_service.switch_lists().await.map_err(error_response)?;
    Ok(Json(SwitchListsResponse {
        kids: kids.into_iter().map(KidMapper::to_dto).collect(),
        success_message: "Chore lists switched successfully".to_string(),
    }))
}

pub async fn award_points(
    State(state): State<AppState>,
    Json(request): Json<AwardPointsRequest>,
) -> ApiResult<Json<KidResponse>> {
    info!("POST /api/admin/award-points - request: {:?}", request);

    let kid = state
        .kid_service
        .award_points(AwardPointsCommand {
            kid_id: request.kid_id,
            points: request.points,
        })
        .await
        .map_err(error_response)?;
    Ok(Json(KidMapper::to_kid_response(kid, "Points awarded successfully")))
}
