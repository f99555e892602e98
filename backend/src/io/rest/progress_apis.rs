//! # REST API for Progress and Task Status
//!
//! Read-only views derived from the ledger: daily and weekly progress and the
//! per-day status of a kid's chores and extra tasks.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use tracing::info;

use super::mappers::{ProgressMapper, TaskMapper};
use super::{error_response, today, ApiResult, DateQuery};
use crate::AppState;
use shared::{DailyProgress, KidChoresResponse, KidExtraTasksResponse, WeeklyProgress};

/// `?start=YYYY-MM-DD`; defaults to six days before today
#[derive(Debug, Deserialize, Default)]
pub struct WeekQuery {
    pub start: Option<NaiveDate>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/kids/:id/chores", get(get_kid_chores))
        .route("/kids/:id/extra-tasks", get(get_kid_extra_tasks))
        .route("/kids/:id/progress", get(get_daily_progress))
        .route("/kids/:id/progress/week", get(get_weekly_progress))
}

pub async fn get_kid_chores(
    State(state): State<AppState>,
    Path(kid_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<KidChoresResponse>> {
    let date = query.date_or_today();
    info!("GET /api/kids/{}/chores?date={}", kid_id, date);

    let view = state
        .progress_service
        .kid_chores(kid_id, date)
        .await
        .map_err(error_response)?;
    Ok(Json(TaskMapper::to_kid_chores_dto(view)))
}

pub async fn get_kid_extra_tasks(
    State(state): State<AppState>,
    Path(kid_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<KidExtraTasksResponse>> {
    let date = query.date_or_today();
    info!("GET /api/kids/{}/extra-tasks?date={}", kid_id, date);

    let view = state
        .progress_service
        .kid_extra_tasks(kid_id, date)
        .await
        .map_err(error_response)?;
    Ok(Json(TaskMapper::to_kid_extra_tasks_dto(view)))
}

pub async fn get_daily_progress(
    State(state): State<AppState>,
    Path(kid_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<DailyProgress>> {
    let date = query.date_or_today();
    info!("GET /api/kids/{}/progress?date={}", kid_id, date);

    let progress = state
        .progress_service
        .compute_daily_progress(kid_id, date)
        .await
        .map_err(error_response)?;
    Ok(Json(ProgressMapper::to_daily_dto(progress)))
}

pub async fn get_weekly_progress(
    State(state): State<AppState>,
    Path(kid_id): Path<i64>,
    Query(query): Query<WeekQuery>,
) -> ApiResult<Json<WeeklyProgress>> {
    let start = query.start.unwrap_or_else(|| today() - Duration::days(6));
    info!("GET /api/kids/{}/progress/week?start={}", kid_id, start);

    let week = state
        .progress_service
        .compute_weekly_progress(kid_id, start)
        .await
        .map_err(error_response)?;
    Ok(Json(ProgressMapper::to_weekly_dto(week)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::chore::CreateChoreCommand;
    use crate::domain::commands::extra_task::CreateExtraTaskCommand;
    use crate::domain::commands::kid::CreateKidCommand;
    use crate::io::rest::test_support::{parse, send, setup_test_state};
    use axum::http::{Method, StatusCode};
    use shared::ChoreListName;

    async fn setup_test_app() -> (Router, i64) {
        let state = setup_test_state().await;
        let kid = state
            .kid_service
            .create_kid(CreateKidCommand {
                name: "Ava".to_string(),
                color: None,
            })
            .await
            .unwrap();
        state
            .chore_service
            .add_chore(CreateChoreCommand {
                list_name: ChoreListName::A,
                chore_name: "Dishes".to_string(),
            })
            .await
            .unwrap();
        state
            .extra_task_service
            .add_extra_task(CreateExtraTaskCommand {
                kid_id: kid.id,
                task_name: "Reading".to_string(),
            })
            .await
            .unwrap();
        (router().with_state(state), kid.id)
    }

    #[tokio::test]
    async fn test_daily_progress_for_date() {
        let (app, kid_id) = setup_test_app().await;

        let (status, body) = send(&app, Method::GET, &format!("/kids/{}/progress?date=2024-01-01", kid_id), None).await;
        assert_eq!(status, StatusCode::OK);
        let progress: DailyProgress = parse(&body);
        assert_eq!(progress.date, "2024-01-01");
        assert_eq!(progress.chores_total, 1);
        assert_eq!(progress.extra_tasks_total, 1);
        assert!(!progress.extra_tasks_completed);
    }

    #[tokio::test]
    async fn test_bad_date_is_rejected() {
        let (app, kid_id) = setup_test_app().await;

        let (status, _) = send(&app, Method::GET, &format!("/kids/{}/progress?date=01-01-2024", kid_id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_views() {
        let (app, kid_id) = setup_test_app().await;

        let (status, body) = send(&app, Method::GET, &format!("/kids/{}/chores?date=2024-01-01", kid_id), None).await;
        assert_eq!(status, StatusCode::OK);
        let chores: KidChoresResponse = parse(&body);
        assert_eq!(chores.list_name, ChoreListName::A);
        assert_eq!(chores.chores.len(), 1);
        assert!(!chores.chores[0].completed);

        let (status, body) = send(&app, Method::GET, &format!("/kids/{}/extra-tasks", kid_id), None).await;
        assert_eq!(status, StatusCode::OK);
        let extras: KidExtraTasksResponse = parse(&body);
        assert_eq!(extras.extra_tasks[0].extra_task.task_name, "Reading");
    }

    #[tokio::test]
    async fn test_weekly_progress() {
        let (app, kid_id) = setup_test_app().await;

        let (status, body) = send(&app, Method::GET, &format!("/kids/{}/progress/week?start=2024-01-01", kid_id), None).await;
        assert_eq!(status, StatusCode::OK);
        let week: WeeklyProgress = parse(&body);
        assert_eq!(week.start_date, "2024-01-01");
        assert_eq!(week.end_date, "2024-01-07");
        assert_eq!(week.days.len(), 7);

        let (status, _) = send(&app, Method::GET, "/kids/999/progress/week", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
