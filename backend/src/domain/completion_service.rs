use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use shared::TaskType;
use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

use super::commands::completion::{CompletionCommand, CompletionResult, TaskHistoryQuery};
use super::kid_locks::KidLocks;
use super::models::completion::CompletionRecord;
use super::models::error::{DomainError, DomainResult};
use super::models::progress::ExtraTasksTransition;
use super::progress_service::ProgressService;
use crate::storage::repositories::{ChoreRepository, CompletionRepository, ExtraTaskRepository, KidRepository};
use crate::storage::DbConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedgerMutation {
    Mark,
    Unmark,
    Toggle,
}

/// Service owning the completion ledger.
///
/// Every mutation is bracketed: progress is computed before and after the
/// ledger write, inside one transaction and under the kid's lock, and a
/// change of the "all extra tasks done" flag awards +1 or -1 point.
#[derive(Clone)]
pub struct CompletionService {
    db: Arc<DbConnection>,
    locks: KidLocks,
    progress: ProgressService,
    kid_repo: KidRepository,
    chore_repo: ChoreRepository,
    extra_repo: ExtraTaskRepository,
    completion_repo: CompletionRepository,
}

impl CompletionService {
    pub fn new(db: Arc<DbConnection>, locks: KidLocks, progress: ProgressService) -> Self {
        Self {
            db,
            locks,
            progress,
            kid_repo: KidRepository::new(),
            chore_repo: ChoreRepository::new(),
            extra_repo: ExtraTaskRepository::new(),
            completion_repo: CompletionRepository::new(),
        }
    }

    /// Whether the slot has a ledger row. The kid must exist.
    pub async fn is_completed(&self, command: &CompletionCommand) -> DomainResult<bool> {
        let mut conn = self.db.acquire().await?;
        if self.kid_repo.get_kid(&mut conn, command.kid_id).await?.is_none() {
            warn!("Kid not found: {}", command.kid_id);
            return Err(DomainError::not_found("Kid", command.kid_id));
        }
        let record = self
            .completion_repo
            .find_completion(&mut conn, command.kid_id, command.task_type, command.task_id, command.date)
            .await?;
        Ok(record.is_some())
    }

    /// Record the task as done. Marking an already-done task changes nothing.
    pub async fn mark_complete(&self, command: CompletionCommand) -> DomainResult<CompletionResult> {
        self.bracket(command, LedgerMutation::Mark).await
    }

    /// Remove the record. Unmarking a task that is not done changes nothing.
    pub async fn unmark_complete(&self, command: CompletionCommand) -> DomainResult<CompletionResult> {
        self.bracket(command, LedgerMutation::Unmark).await
    }

    /// Flip the slot: unmark when done, mark otherwise
    pub async fn toggle(&self, command: CompletionCommand) -> DomainResult<CompletionResult> {
        self.bracket(command, LedgerMutation::Toggle).await
    }

    pub async fn list_completions(&self, kid_id: i64, date: NaiveDate) -> DomainResult<Vec<CompletionRecord>> {
        let mut conn = self.db.acquire().await?;
        if self.kid_repo.get_kid(&mut conn, kid_id).await?.is_none() {
            warn!("Kid not found: {}", kid_id);
            return Err(DomainError::not_found("Kid", kid_id));
        }
        Ok(self.completion_repo.list_completions(&mut conn, kid_id, date).await?)
    }

    /// Ledger rows ordered by completion time
    pub async fn get_task_history(&self, query: TaskHistoryQuery) -> DomainResult<Vec<CompletionRecord>> {
        info!("Getting task history: {:?}", query);

        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(DomainError::invalid(format!(
                    "start_date {} is after end_date {}",
                    start, end
                )));
            }
        }

        let mut conn = self.db.acquire().await?;
        let history = self
            .completion_repo
            .list_history(&mut conn, query.kid_id, query.start_date, query.end_date)
            .await?;

        info!("Found {} history records", history.len());
        Ok(history)
    }

    async fn bracket(&self, command: CompletionCommand, mutation: LedgerMutation) -> DomainResult<CompletionResult> {
        info!(
            "{:?} {} task {} for kid {} on {}",
            mutation, command.task_type, command.task_id, command.kid_id, command.date
        );

        let _guard = self.locks.lock(command.kid_id).await;
        let mut tx = self.db.begin().await?;

        // Takes the write lock before any read
        if !self.kid_repo.lock_kid_row(&mut tx, command.kid_id).await? {
            warn!("Kid not found: {}", command.kid_id);
            return Err(DomainError::not_found("Kid", command.kid_id));
        }
        self.ensure_task(&mut tx, &command).await?;

        let kid = self
            .kid_repo
            .get_kid(&mut tx, command.kid_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Kid", command.kid_id))?;

        let before = self.progress.progress_in(&mut tx, &kid, command.date).await?;

        let existing = self
            .completion_repo
            .find_completion(&mut tx, command.kid_id, command.task_type, command.task_id, command.date)
            .await?;

        let record = match (mutation, existing) {
            (LedgerMutation::Mark, Some(record)) => Some(record),
            (LedgerMutation::Mark, None) | (LedgerMutation::Toggle, None) => Some(
                self.completion_repo
                    .insert_completion(
                        &mut tx,
                        command.kid_id,
                        command.task_type,
                        command.task_id,
                        command.date,
                        Utc::now(),
                    )
                    .await?,
            ),
            (LedgerMutation::Unmark, None) => None,
            (LedgerMutation::Unmark, Some(_)) | (LedgerMutation::Toggle, Some(_)) => {
                self.completion_repo
                    .delete_completion(&mut tx, command.kid_id, command.task_type, command.task_id, command.date)
                    .await?;
                None
            }
        };

        let after = self.progress.progress_in(&mut tx, &kid, command.date).await?;
        let transition = ExtraTasksTransition::between(&before, &after);
        let delta = transition.points_delta();

        debug!(
            "Kid {} extra tasks {} -> {} on {}: {:?}",
            kid.id, before.extra_tasks_completed, after.extra_tasks_completed, command.date, transition
        );

        if delta != 0 {
            self.kid_repo.add_points(&mut tx, kid.id, delta).await?;
        }

        tx.commit().await?;

        if delta != 0 {
            info!("Kid {} points changed by {} to {}", kid.id, delta, kid.points + delta);
        }

        Ok(CompletionResult {
            completed: record.is_some(),
            record,
            transition,
            kid_points: kid.points + delta,
            progress: after,
        })
    }

    /// The referenced task must exist; an extra task must also belong to the kid
    async fn ensure_task(&self, conn: &mut SqliteConnection, command: &CompletionCommand) -> DomainResult<()> {
        match command.task_type {
            TaskType::Chore => {
                if self.chore_repo.get_chore(conn, command.task_id).await?.is_none() {
                    warn!("Chore not found: {}", command.task_id);
                    return Err(DomainError::not_found("Chore", command.task_id));
                }
            }
            TaskType::Extra => {
                let owned = self
                    .extra_repo
                    .get_extra_task(conn, command.task_id)
                    .await?
                    .is_some_and(|task| task.kid_id == command.kid_id);
                if !owned {
                    warn!("Extra task {} not found for kid {}", command.task_id, command.kid_id);
                    return Err(DomainError::not_found("Extra task", command.task_id));
                }
            }
        }
        Ok(())
    }
}
