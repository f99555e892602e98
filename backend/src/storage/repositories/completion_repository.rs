use anyhow::Result;
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use shared::TaskType;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};

use crate::domain::models::completion::CompletionRecord;
use crate::storage::{format_date, format_timestamp, parse_date, parse_timestamp};

/// Repository for the task completion ledger.
///
/// A row means the task was done that day; its absence means it was not.
/// Rows are inserted and deleted, never updated.
#[derive(Clone, Default)]
pub struct CompletionRepository;

impl CompletionRepository {
    pub fn new() -> Self {
        Self
    }

    /// Find the record for (kid, type, task, date), if any
    pub async fn find_completion(
        &self,
        conn: &mut SqliteConnection,
        kid_id: i64,
        task_type: TaskType,
        task_id: i64,
        date: NaiveDate,
    ) -> Result<Option<CompletionRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, kid_id, task_type, task_id, date, completed_at
            FROM task_completions
            WHERE kid_id = ? AND task_type = ? AND task_id = ? AND date = ?
            "#,
        )
        .bind(kid_id)
        .bind(task_type.as_str())
        .bind(task_id)
        .bind(format_date(date))
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    /// Insert a record. Fails on the unique index if one already exists.
    pub async fn insert_completion(
        &self,
        conn: &mut SqliteConnection,
        kid_id: i64,
        task_type: TaskType,
        task_id: i64,
        date: NaiveDate,
        completed_at: DateTime<Utc>,
    ) -> Result<CompletionRecord> {
        // Stored with microsecond precision
        let completed_at = completed_at.trunc_subsecs(6);
        let result = sqlx::query(
            r#"
            INSERT INTO task_completions (kid_id, task_type, task_id, date, completed_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(kid_id)
        .bind(task_type.as_str())
        .bind(task_id)
        .bind(format_date(date))
        .bind(format_timestamp(completed_at))
        .execute(&mut *conn)
        .await?;

        Ok(CompletionRecord {
            id: result.last_insert_rowid(),
            kid_id,
            task_type,
            task_id,
            date,
            completed_at,
        })
    }

    /// Delete the record for (kid, type, task, date).
    /// Returns true if a row was removed.
    pub async fn delete_completion(
        &self,
        conn: &mut SqliteConnection,
        kid_id: i64,
        task_type: TaskType,
        task_id: i64,
        date: NaiveDate,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM task_completions
            WHERE kid_id = ? AND task_type = ? AND task_id = ? AND date = ?
            "#,
        )
        .bind(kid_id)
        .bind(task_type.as_str())
        .bind(task_id)
        .bind(format_date(date))
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All records of one kid on one day
    pub async fn list_completions(
        &self,
        conn: &mut SqliteConnection,
        kid_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<CompletionRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, kid_id, task_type, task_id, date, completed_at
            FROM task_completions
            WHERE kid_id = ? AND date = ?
            ORDER BY completed_at ASC, id ASC
            "#,
        )
        .bind(kid_id)
        .bind(format_date(date))
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// Records ordered by completion time, filtered by kid and an inclusive date range
    pub async fn list_history(
        &self,
        conn: &mut SqliteConnection,
        kid_id: Option<i64>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CompletionRecord>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, kid_id, task_type, task_id, date, completed_at FROM task_completions WHERE 1 = 1",
        );
        if let Some(kid_id) = kid_id {
            query.push(" AND kid_id = ").push_bind(kid_id);
        }
        if let Some(start) = start_date {
            query.push(" AND date >= ").push_bind(format_date(start));
        }
        if let Some(end) = end_date {
            query.push(" AND date <= ").push_bind(format_date(end));
        }
        query.push(" ORDER BY completed_at ASC, id ASC");

        let rows = query.build().fetch_all(&mut *conn).await?;
        rows.iter().map(Self::row_to_record).collect()
    }

    fn row_to_record(row: &SqliteRow) -> Result<CompletionRecord> {
        let task_type: String = row.try_get("task_type")?;
        let date: String = row.try_get("date")?;
        let completed_at: String = row.try_get("completed_at")?;
        Ok(CompletionRecord {
            id: row.try_get("id")?,
            kid_id: row.try_get("kid_id")?,
            task_type: task_type.parse::<TaskType>().map_err(anyhow::Error::msg)?,
            task_id: row.try_get("task_id")?,
            date: parse_date(&date)?,
            completed_at: parse_timestamp(&completed_at)?,
        })
    }
}
