//! # REST API for Chore Definitions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::mappers::TaskMapper;
use super::{error_response, invalid_input, ApiResult};
use crate::domain::commands::chore::{CreateChoreCommand, UpdateChoreCommand};
use crate::AppState;
use shared::{ChoreDefinition, ChoreListName, ChoreListResponse, CreateChoreRequest, UpdateChoreRequest};

/// `?list=A|B`, `?list=A&active=true`, or `?kid_id=N` for the active chores
/// of that kid's current list
#[derive(Debug, Deserialize, Default)]
pub struct ChoreListQuery {
    pub list: Option<ChoreListName>,
    pub kid_id: Option<i64>,
    #[serde(default)]
    pub active: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chores", get(list_chores).post(add_chore))
        .route("/chores/:id", patch(update_chore).delete(deactivate_chore))
}

pub async fn list_chores(
    State(state): State<AppState>,
    Query(query): Query<ChoreListQuery>,
) -> ApiResult<Json<ChoreListResponse>> {
    info!("GET /api/chores - query: {:?}", query);

    let chores = match (query.kid_id, query.list) {
        (Some(_), Some(_)) => return Err(invalid_input("kid_id and list cannot be combined")),
        (Some(kid_id), None) => state.chore_service.get_kid_active_chores(kid_id).await,
        (None, Some(list)) if query.active => state.chore_service.get_active_chore_list(list).await,
        (None, None) if query.active => return Err(invalid_input("active=true requires list or kid_id")),
        (None, list) => state.chore_service.list_chores(list).await,
    }
    .map_err(error_response)?;
    Ok(Json(TaskMapper::to_chore_list_dto(chores)))
}

pub async fn add_chore(
    State(state): State<AppState>,
    Json(request): Json<CreateChoreRequest>,
) -> ApiResult<(StatusCode, Json<ChoreDefinition>)> {
    info!("POST /api/chores - request: {:?}", request);

    let chore = state
        .chore_service
        .add_chore(CreateChoreCommand {
            list_name: request.list_name,
            chore_name: request.chore_name,
        })
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(TaskMapper::to_chore_dto(chore))))
}

pub async fn update_chore(
    State(state): State<AppState>,
    Path(chore_id): Path<i64>,
    Json(request): Json<UpdateChoreRequest>,
) -> ApiResult<Json<ChoreDefinition>> {
    info!("PATCH /api/chores/{} - request: {:?}", chore_id, request);

    let chore = state
        .chore_service
        .update_chore(
            chore_id,
            UpdateChoreCommand {
                list_name: request.list_name,
                chore_name: request.chore_name,
                active: request.active,
            },
        )
        .await
        .map_err(error_response)?;
    Ok(Json(TaskMapper::to_chore_dto(chore)))
}

pub async fn deactivate_chore(
    State(state): State<AppState>,
    Path(chore_id): Path<i64>,
) -> ApiResult<Json<ChoreDefinition>> {
    info!("DELETE /api/chores/{}", chore_id);

    let chore = state
        .chore_service
        .deactivate_chore(chore_id)
        .await
        .map_err(error_response)?;
    Ok(Json(TaskMapper::to_chore_dto(chore)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::kid::CreateKidCommand;
    use crate::io::rest::test_support::{parse, send, setup_test_state};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_chore_lifecycle() {
        let app = router().with_state(setup_test_state().await);

        let (status, body) = send(
            &app,
            Method::POST,
            "/chores",
            Some(json!({ "list_name": "A", "chore_name": "Dishes" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let dishes: ChoreDefinition = parse(&body);
        assert!(dishes.active);

        send(&app, Method::POST, "/chores", Some(json!({ "list_name": "B", "chore_name": "Trash" }))).await;

        let (_, body) = send(&app, Method::GET, "/chores?list=A", None).await;
        let list_a: ChoreListResponse = parse(&body);
        assert_eq!(list_a.chores, vec![dishes.clone()]);

        let (status, body) = send(&app, Method::DELETE, &format!("/chores/{}", dishes.id), None).await;
        assert_eq!(status, StatusCode::OK);
        let deactivated: ChoreDefinition = parse(&body);
        assert!(!deactivated.active);

        let (_, body) = send(&app, Method::GET, "/chores", None).await;
        let all: ChoreListResponse = parse(&body);
        assert_eq!(all.chores.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_list_name_is_rejected() {
        let app = router().with_state(setup_test_state().await);

        let (status, _) = send(
            &app,
            Method::POST,
            "/chores",
            Some(json!({ "list_name": "C", "chore_name": "Dishes" })),
        )
        .await;
        assert!(status.is_client_error());

        let (status, _) = send(&app, Method::PATCH, "/chores/5", Some(json!({ "active": true }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_active_chore_views() {
        let state = setup_test_state().await;
        let kid = state
            .kid_service
            .create_kid(CreateKidCommand {
                name: "Ava".to_string(),
                color: None,
            })
            .await
            .unwrap();
        let app = router().with_state(state);

        let (_, body) = send(&app, Method::POST, "/chores", Some(json!({ "list_name": "A", "chore_name": "Dishes" }))).await;
        let dishes: ChoreDefinition = parse(&body);
        let (_, body) = send(&app, Method::POST, "/chores", Some(json!({ "list_name": "A", "chore_name": "Sweep" }))).await;
        let sweep: ChoreDefinition = parse(&body);
        send(&app, Method::POST, "/chores", Some(json!({ "list_name": "B", "chore_name": "Trash" }))).await;
        send(&app, Method::DELETE, &format!("/chores/{}", sweep.id), None).await;

        let (status, body) = send(&app, Method::GET, "/chores?list=A&active=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<ChoreListResponse>(&body).chores, vec![dishes.clone()]);

        let (_, body) = send(&app, Method::GET, &format!("/chores?kid_id={}", kid.id), None).await;
        assert_eq!(parse::<ChoreListResponse>(&body).chores, vec![dishes]);

        let (status, _) = send(&app, Method::GET, "/chores?kid_id=999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/chores?active=true", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
