//! # REST API for Extra Tasks

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
use crate::domain::commands::extra_task::{CreateExtraTaskCommand, UpdateExtraTaskCommand};
use crate::AppState;
use shared::{CreateExtraTaskRequest, ExtraTask, ExtraTaskListResponse, UpdateExtraTaskRequest};

/// `?kid_id=N`, and `&active=true` for only the tasks that count toward progress
#[derive(Debug, Deserialize, Default)]
pub struct ExtraTaskListQuery {
    pub kid_id: Option<i64>,
    #[serde(default)]
    pub active: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extra-tasks", get(list_extra_tasks).post(add_extra_task))
        .route("/extra-tasks/:id", patch(update_extra_task).delete(deactivate_extra_task))
}

pub async fn list_extra_tasks(
    State(state): State<AppState>,
    Query(query): Query<ExtraTaskListQuery>,
) -> ApiResult<Json<ExtraTaskListResponse>> {
    info!("GET /api/extra-tasks - query: {:?}", query);

    let tasks = match query.kid_id {
        Some(kid_id) if query.active => state.extra_task_service.get_kid_active_extra_tasks(kid_id).await,
        None if query.active => return Err(invalid_input("active=true requires kid_id")),
        kid_id => state.extra_task_service.list_extra_tasks(kid_id).await,
    }
    .map_err(error_response)?;
    Ok(Json(TaskMapper::to_extra_task_list_dto(tasks)))
}

pub async fn add_extra_task(
    State(state): State<AppState>,
    Json(request): Json<CreateExtraTaskRequest>,
) -> ApiResult<(StatusCode, Json<ExtraTask>)> {
    info!("POST /api/extra-tasks - request: {:?}", request);

    let task = state
        .extra_task_service
        .add_extra_task(CreateExtraTaskCommand {
            kid_id: request.kid_id,
            task_name: request.task_name,
        })
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(TaskMapper::to_extra_task_dto(task))))
}

pub async fn update_extra_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(request): Json<UpdateExtraTaskRequest>,
) -> ApiResult<Json<ExtraTask>> {
    info!("PATCH /api/extra-tasks/{} - request: {:?}", task_id, request);

    let task = state
        .extra_task_service
        .update_extra_task(
            task_id,
            UpdateExtraTaskCommand {
                task_name: request.task_name,
                active: request.active,
            },
        )
        .await
        .map_err(error_response)?;
    Ok(Json(TaskMapper::to_extra_task_dto(task)))
}

pub async fn deactivate_extra_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<ExtraTask>> {
    info!("DELETE /api/extra-tasks/{}", task_id);

    let task = state
        .extra_task_service
        .deactivate_extra_task(task_id)
        .await
        .map_err(error_response)?;
    Ok(Json(TaskMapper::to_extra_task_dto(task)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::kid::CreateKidCommand;
    use crate::io::rest::test_support::{parse, send, setup_test_state};
    use axum::http::Method;
    use serde_json::json;
    use shared::ErrorResponse;

    #[tokio::test]
    async fn test_extra_task_lifecycle() {
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

        let (status, body) = send(
            &app,
            Method::POST,
            "/extra-tasks",
            Some(json!({ "kid_id": kid.id, "task_name": "Reading" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let reading: ExtraTask = parse(&body);
        assert_eq!(reading.kid_id, kid.id);

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/extra-tasks/{}", reading.id),
            Some(json!({ "task_name": "Read a chapter" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let renamed: ExtraTask = parse(&body);
        assert_eq!(renamed.task_name, "Read a chapter");

        send(&app, Method::DELETE, &format!("/extra-tasks/{}", reading.id), None).await;

        let (_, body) = send(&app, Method::GET, &format!("/extra-tasks?kid_id={}", kid.id), None).await;
        let listed: ExtraTaskListResponse = parse(&body);
        assert_eq!(listed.extra_tasks.len(), 1);
        assert!(!listed.extra_tasks[0].active);
    }

    #[tokio::test]
    async fn test_extra_task_for_missing_kid() {
        let app = router().with_state(setup_test_state().await);

        let (status, body) = send(
            &app,
            Method::POST,
            "/extra-tasks",
            Some(json!({ "kid_id": 77, "task_name": "Reading" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = parse(&body);
        assert_eq!(error.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_active_extra_tasks_for_kid() {
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

        let (_, body) = send(&app, Method::POST, "/extra-tasks", Some(json!({ "kid_id": kid.id, "task_name": "Reading" }))).await;
        let reading: ExtraTask = parse(&body);
        let (_, body) = send(&app, Method::POST, "/extra-tasks", Some(json!({ "kid_id": kid.id, "task_name": "Piano" }))).await;
        let piano: ExtraTask = parse(&body);
        send(&app, Method::DELETE, &format!("/extra-tasks/{}", piano.id), None).await;

        let (status, body) = send(&app, Method::GET, &format!("/extra-tasks?kid_id={}&active=true", kid.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<ExtraTaskListResponse>(&body).extra_tasks, vec![reading]);

        let (status, _) = send(&app, Method::GET, "/extra-tasks?kid_id=999&active=true", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/extra-tasks?active=true", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
