use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use shared::TaskType;
use sqlx::SqliteConnection;
use tracing::{info, warn};

use super::commands::progress::{KidChoresView, KidExtraTasksView};
use super::models::error::{DomainError, DomainResult};
use super::models::kid::Kid;
use super::models::progress::{DailyProgress, WeeklyProgress};
use super::progress::{evaluate, evaluate_week, DAYS_PER_WEEK};
use crate::storage::repositories::{ChoreRepository, CompletionRepository, ExtraTaskRepository, KidRepository};
use crate::storage::DbConnection;

/// Loads a kid's active sets and ledger rows and derives progress from them
#[derive(Clone)]
pub struct ProgressService {
    db: Arc<DbConnection>,
    kid_repo: KidRepository,
    chore_repo: ChoreRepository,
    extra_repo: ExtraTaskRepository,
    completion_repo: CompletionRepository,
}

impl ProgressService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            db,
            kid_repo: KidRepository::new(),
            chore_repo: ChoreRepository::new(),
            extra_repo: ExtraTaskRepository::new(),
            completion_repo: CompletionRepository::new(),
        }
    }

    pub async fn compute_daily_progress(&self, kid_id: i64, date: NaiveDate) -> DomainResult<DailyProgress> {
        info!("Computing progress for kid {} on {}", kid_id, date);

        let mut conn = self.db.acquire().await?;
        let kid = self.require_kid(&mut conn, kid_id).await?;
        self.progress_in(&mut conn, &kid, date).await
    }

    /// Seven days from `start_date`, each evaluated against today's active sets
    pub async fn compute_weekly_progress(&self, kid_id: i64, start_date: NaiveDate) -> DomainResult<WeeklyProgress> {
        info!("Computing weekly progress for kid {} from {}", kid_id, start_date);

        let mut conn = self.db.acquire().await?;
        let kid = self.require_kid(&mut conn, kid_id).await?;

        let chores = self.chore_repo.list_active_chores(&mut conn, kid.current_list).await?;
        let extras = self.extra_repo.list_active_for_kid(&mut conn, kid.id).await?;
        let end_date = start_date + Duration::days(DAYS_PER_WEEK - 1);
        let completions = self
            .completion_repo
            .list_history(&mut conn, Some(kid.id), Some(start_date), Some(end_date))
            .await?;

        Ok(evaluate_week(kid.id, start_date, &chores, &extras, &completions))
    }

    /// The kid's active chores with done flags for `date`
    pub async fn kid_chores(&self, kid_id: i64, date: NaiveDate) -> DomainResult<KidChoresView> {
        let mut conn = self.db.acquire().await?;
        let kid = self.require_kid(&mut conn, kid_id).await?;

        let chores = self.chore_repo.list_active_chores(&mut conn, kid.current_list).await?;
        let completions = self.completion_repo.list_completions(&mut conn, kid.id, date).await?;

        let chores = chores
            .into_iter()
            .map(|chore| {
                let done = completions
                    .iter()
                    .any(|r| r.task_type == TaskType::Chore && r.task_id == chore.id);
                (chore, done)
            })
            .collect();

        Ok(KidChoresView {
            kid_id: kid.id,
            date,
            list_name: kid.current_list,
            chores,
        })
    }

    /// The kid's active extra tasks with done flags for `date`
    pub async fn kid_extra_tasks(&self, kid_id: i64, date: NaiveDate) -> DomainResult<KidExtraTasksView> {
        let mut conn = self.db.acquire().await?;
        let kid = self.require_kid(&mut conn, kid_id).await?;

        let extras = self.extra_repo.list_active_for_kid(&mut conn, kid.id).await?;
        let completions = self.completion_repo.list_completions(&mut conn, kid.id, date).await?;

        let extra_tasks = extras
            .into_iter()
            .map(|task| {
                let done = completions
                    .iter()
                    .any(|r| r.task_type == TaskType::Extra && r.task_id == task.id);
                (task, done)
            })
            .collect();

        Ok(KidExtraTasksView {
            kid_id: kid.id,
            date,
            extra_tasks,
        })
    }

    /// Progress read through an existing connection or transaction
    pub(crate) async fn progress_in(
        &self,
        conn: &mut SqliteConnection,
        kid: &Kid,
        date: NaiveDate,
    ) -> DomainResult<DailyProgress> {
        let chores = self.chore_repo.list_active_chores(conn, kid.current_list).await?;
        let extras = self.extra_repo.list_active_for_kid(conn, kid.id).await?;
        let completions = self.completion_repo.list_completions(conn, kid.id, date).await?;

        Ok(evaluate(kid.id, date, &chores, &extras, &completions))
    }

    async fn require_kid(&self, conn: &mut SqliteConnection, kid_id: i64) -> DomainResult<Kid> {
        match self.kid_repo.get_kid(conn, kid_id).await? {
            Some(kid) => Ok(kid),
            None => {
                warn!("Kid not found: {}", kid_id);
                Err(DomainError::not_found("Kid", kid_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::ChoreListName;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    struct Fixture {
        service: ProgressService,
        db: Arc<DbConnection>,
        kid_id: i64,
        dishes: i64,
        trash: i64,
        reading: i64,
    }

    async fn setup_test() -> Fixture {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        let mut conn = db.acquire().await.unwrap();

        let kid = KidRepository::new().insert_kid(&mut conn, "Ava", "#FF6B6B").await.unwrap();
        let chores = ChoreRepository::new();
        let dishes = chores.insert_chore(&mut conn, ChoreListName::A, "Dishes").await.unwrap();
        let trash = chores.insert_chore(&mut conn, ChoreListName::B, "Trash").await.unwrap();
        let reading = ExtraTaskRepository::new()
            .insert_extra_task(&mut conn, kid.id, "Reading")
            .await
            .unwrap();
        drop(conn);

        Fixture {
            service: ProgressService::new(db.clone()),
            db,
            kid_id: kid.id,
            dishes: dishes.id,
            trash: trash.id,
            reading: reading.id,
        }
    }

    async fn record(f: &Fixture, task_type: TaskType, task_id: i64, date: NaiveDate) {
        let mut conn = f.db.acquire().await.unwrap();
        CompletionRepository::new()
            .insert_completion(&mut conn, f.kid_id, task_type, task_id, date, Utc::now())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_daily_progress_uses_current_list() {
        let f = setup_test().await;
        record(&f, TaskType::Chore, f.dishes, jan(1)).await;
        record(&f, TaskType::Chore, f.trash, jan(1)).await;

        let progress = f.service.compute_daily_progress(f.kid_id, jan(1)).await.unwrap();
        assert!(progress.chores_completed);
        assert_eq!(progress.chores_total, 1);
        assert!(!progress.extra_tasks_completed);
        assert_eq!(progress.points_earned_today, 0);
    }

    #[tokio::test]
    async fn test_daily_progress_missing_kid() {
        let f = setup_test().await;
        let result = f.service.compute_daily_progress(f.kid_id + 1, jan(1)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_status_views() {
        let f = setup_test().await;
        record(&f, TaskType::Extra, f.reading, jan(1)).await;

        let chores = f.service.kid_chores(f.kid_id, jan(1)).await.unwrap();
        assert_eq!(chores.list_name, ChoreListName::A);
        assert_eq!(chores.chores.len(), 1);
        assert_eq!(chores.chores[0].0.id, f.dishes);
        assert!(!chores.chores[0].1);

        let extras = f.service.kid_extra_tasks(f.kid_id, jan(1)).await.unwrap();
        assert_eq!(extras.extra_tasks.len(), 1);
        assert!(extras.extra_tasks[0].1);

        let next_day = f.service.kid_extra_tasks(f.kid_id, jan(2)).await.unwrap();
        assert!(!next_day.extra_tasks[0].1);
    }

    #[tokio::test]
    async fn test_weekly_progress() {
        let f = setup_test().await;
        record(&f, TaskType::Extra, f.reading, jan(1)).await;
        record(&f, TaskType::Extra, f.reading, jan(4)).await;
        record(&f, TaskType::Chore, f.dishes, jan(4)).await;
        // Outside the week
        record(&f, TaskType::Extra, f.reading, jan(8)).await;

        let week = f.service.compute_weekly_progress(f.kid_id, jan(1)).await.unwrap();
        assert_eq!(week.end_date, jan(7));
        assert_eq!(week.days_all_extra_tasks_done, 2);
        assert_eq!(week.days_all_chores_done, 1);
        assert!(week.days[3].chores_completed);
    }
}
