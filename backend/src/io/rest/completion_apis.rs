//! # REST API for the Completion Ledger
//!
//! Check, mark, unmark and toggle a task for a kid on a day, list a day's
//! records, and query the history.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::TaskType;
use tracing::info;

use super::mappers::CompletionMapper;
use super::{error_response, invalid_input, ApiResult, DateQuery};
use crate::domain::commands::completion::{CompletionCommand, TaskHistoryQuery};
use crate::AppState;
use shared::{CompletionListResponse, CompletionStatusResponse, TaskCompletionResponse};

#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    pub kid_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/kids/:id/completions", get(list_completions))
        .route("/kids/:id/tasks/:task_type/:task_id/toggle", post(toggle_completion))
        .route(
            "/kids/:id/tasks/:task_type/:task_id/completion",
            get(get_completion_status).put(mark_complete).delete(unmark_complete),
        )
        .route("/history", get(get_task_history))
}

fn completion_command(
    (kid_id, task_type, task_id): (i64, String, i64),
    query: &DateQuery,
) -> ApiResult<CompletionCommand> {
    let task_type = task_type.parse::<TaskType>().map_err(invalid_input)?;
    Ok(CompletionCommand {
        kid_id,
        task_type,
        task_id,
        date: query.date_or_today(),
    })
}

pub async fn toggle_completion(
    State(state): State<AppState>,
    Path(path): Path<(i64, String, i64)>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<TaskCompletionResponse>> {
    let command = completion_command(path, &query)?;
    info!(
        "POST /api/kids/{}/tasks/{}/{}/toggle?date={}",
        command.kid_id, command.task_type, command.task_id, command.date
    );

    let result = state.completion_service.toggle(command).await.map_err(error_response)?;
    Ok(Json(CompletionMapper::to_task_completion_dto(result)))
}

pub async fn get_completion_status(
    State(state): State<AppState>,
    Path(path): Path<(i64, String, i64)>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<CompletionStatusResponse>> {
    let command = completion_command(path, &query)?;
    info!(
        "GET /api/kids/{}/tasks/{}/{}/completion?date={}",
        command.kid_id, command.task_type, command.task_id, command.date
    );

    let completed = state
        .completion_service
        .is_completed(&command)
        .await
        .map_err(error_response)?;
    Ok(Json(CompletionMapper::to_status_dto(command, completed)))
}

pub async fn mark_complete(
    State(state): State<AppState>,
    Path(path): Path<(i64, String, i64)>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<TaskCompletionResponse>> {
    let command = completion_command(path, &query)?;
    info!(
        "PUT /api/kids/{}/tasks/{}/{}/completion?date={}",
        command.kid_id, command.task_type, command.task_id, command.date
    );

    let result = state
        .completion_service
        .mark_complete(command)
        .await
        .map_err(error_response)?;
    Ok(Json(CompletionMapper::to_task_completion_dto(result)))
}

pub async fn unmark_complete(
    State(state): State<AppState>,
    Path(path): Path<(i64, String, i64)>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<TaskCompletionResponse>> {
    let command = completion_command(path, &query)?;
    info!(
        "DELETE /api/kids/{}/tasks/{}/{}/completion?date={}",
        command.kid_id, command.task_type, command.task_id, command.date
    );

    let result = state
        .completion_service
        .unmark_complete(command)
        .await
        .map_err(error_response)?;
    Ok(Json(CompletionMapper::to_task_completion_dto(result)))
}

pub async fn list_completions(
    State(state): State<AppState>,
    Path(kid_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<CompletionListResponse>> {
    let date = query.date_or_today();
    info!("GET /api/kids/{}/completions?date={}", kid_id, date);

    let records = state
        .completion_service
        .list_completions(kid_id, date)
        .await
        .map_err(error_response)?;
    Ok(Json(CompletionMapper::to_completion_list_dto(records)))
}

pub async fn get_task_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<CompletionListResponse>> {
    info!("GET /api/history - query: {:?}", query);

    let records = state
        .completion_service
        .get_task_history(TaskHistoryQuery {
            kid_id: query.kid_id,
            start_date: query.start_date,
            end_date: query.end_date,
        })
        .await
        .map_err(error_response)?;
    Ok(Json(CompletionMapper::to_completion_list_dto(records)))
}
