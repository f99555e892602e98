use std::sync::Arc;

use sqlx::SqliteConnection;
use tracing::{info, warn};

use super::commands::extra_task::{CreateExtraTaskCommand, UpdateExtraTaskCommand};
use super::models::error::{DomainError, DomainResult};
use super::models::task::ExtraTask;
use super::validation::validate_name;
use crate::storage::repositories::{ExtraTaskRepository, KidRepository};
use crate::storage::DbConnection;

/// Service for per-kid extra tasks
#[derive(Clone)]
pub struct ExtraTaskService {
    db: Arc<DbConnection>,
    extra_repo: ExtraTaskRepository,
    kid_repo: KidRepository,
}

impl ExtraTaskService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            db,
            extra_repo: ExtraTaskRepository::new(),
            kid_repo: KidRepository::new(),
        }
    }

    pub async fn add_extra_task(&self, command: CreateExtraTaskCommand) -> DomainResult<ExtraTask> {
        info!("Adding extra task '{}' for kid {}", command.task_name, command.kid_id);

        let name = validate_name("Task name", &command.task_name)?;
        let mut conn = self.db.acquire().await?;
        self.require_kid(&mut conn, command.kid_id).await?;

        let task = self.extra_repo.insert_extra_task(&mut conn, command.kid_id, &name).await?;
        info!("Created extra task {} for kid {}", task.id, task.kid_id);
        Ok(task)
    }

    /// All extra tasks including inactive ones, optionally for one kid
    pub async fn list_extra_tasks(&self, kid_id: Option<i64>) -> DomainResult<Vec<ExtraTask>> {
        let mut conn = self.db.acquire().await?;
        Ok(self.extra_repo.list_extra_tasks(&mut conn, kid_id).await?)
    }

    pub async fn get_kid_active_extra_tasks(&self, kid_id: i64) -> DomainResult<Vec<ExtraTask>> {
        let mut conn = self.db.acquire().await?;
        self.require_kid(&mut conn, kid_id).await?;
        Ok(self.extra_repo.list_active_for_kid(&mut conn, kid_id).await?)
    }

    pub async fn update_extra_task(&self, task_id: i64, command: UpdateExtraTaskCommand) -> DomainResult<ExtraTask> {
        info!("Updating extra task: {}", task_id);

        let mut conn = self.db.acquire().await?;
        let mut task = match self.extra_repo.get_extra_task(&mut conn, task_id).await? {
            Some(task) => task,
            None => {
                warn!("Extra task not found: {}", task_id);
                return Err(DomainError::not_found("Extra task", task_id));
            }
        };

        if let Some(name) = command.task_name {
            task.task_name = validate_name("Task name", &name)?;
        }
        if let Some(active) = command.active {
            task.active = active;
        }

        self.extra_repo.update_extra_task(&mut conn, &task).await?;
        Ok(task)
    }

    /// Soft delete. Points already awarded are not revisited.
    pub async fn deactivate_extra_task(&self, task_id: i64) -> DomainResult<ExtraTask> {
        info!("Deactivating extra task: {}", task_id);
        self.update_extra_task(
            task_id,
            UpdateExtraTaskCommand {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    async fn require_kid(&self, conn: &mut SqliteConnection, kid_id: i64) -> DomainResult<()> {
        if self.kid_repo.get_kid(conn, kid_id).await?.is_none() {
            warn!("Kid not found: {}", kid_id);
            return Err(DomainError::not_found("Kid", kid_id));
        }
        Ok(())
    }
}
