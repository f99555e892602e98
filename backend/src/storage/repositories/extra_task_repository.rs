use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::task::ExtraTask;

/// Repository for per-kid extra tasks
#[derive(Clone, Default)]
pub struct ExtraTaskRepository;

impl ExtraTaskRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert_extra_task(&self, conn: &mut SqliteConnection, kid_id: i64, task_name: &str) -> Result<ExtraTask> {
        let result = sqlx::query(
            r#"
            INSERT INTO extra_tasks (kid_id, task_name, active)
            VALUES (?, ?, 1)
            "#,
        )
        .bind(kid_id)
        .bind(task_name)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        self.get_extra_task(conn, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Extra task {} vanished after insert", id))
    }

    pub async fn get_extra_task(&self, conn: &mut SqliteConnection, task_id: i64) -> Result<Option<ExtraTask>> {
        let row = sqlx::query(
            r#"
            SELECT id, kid_id, task_name, active
            FROM extra_tasks
            WHERE id = ?
            "#,
        )
        .bind(task_id)
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(Self::row_to_task).transpose()
    }

    /// All extra tasks, active and inactive, optionally for one kid
    pub async fn list_extra_tasks(&self, conn: &mut SqliteConnection, kid_id: Option<i64>) -> Result<Vec<ExtraTask>> {
        let rows = sqlx::query(
            r#"
            SELECT id, kid_id, task_name, active
            FROM extra_tasks
            WHERE ? IS NULL OR kid_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(kid_id)
        .bind(kid_id)
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(Self::row_to_task).collect()
    }

    pub async fn list_active_for_kid(&self, conn: &mut SqliteConnection, kid_id: i64) -> Result<Vec<ExtraTask>> {
        let rows = sqlx::query(
            r#"
            SELECT id, kid_id, task_name, active
            FROM extra_tasks
            WHERE kid_id = ? AND active = 1
            ORDER BY id ASC
            "#,
        )
        .bind(kid_id)
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(Self::row_to_task).collect()
    }

    pub async fn update_extra_task(&self, conn: &mut SqliteConnection, task: &ExtraTask) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE extra_tasks
            SET task_name = ?, active = ?
            WHERE id = ?
            "#,
        )
        .bind(&task.task_name)
        .bind(task.active)
        .bind(task.id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    fn row_to_task(row: &SqliteRow) -> Result<ExtraTask> {
        Ok(ExtraTask {
            id: row.try_get("id")?,
            kid_id: row.try_get("kid_id")?,
            task_name: row.try_get("task_name")?,
            active: row.try_get("active")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::KidRepository;
    use crate::storage::DbConnection;

    #[tokio::test]
    async fn test_tasks_are_scoped_to_kid() {
        let db = DbConnection::init_test().await.unwrap();
        let kids = KidRepository::new();
        let repo = ExtraTaskRepository::new();
        let mut conn = db.acquire().await.unwrap();

        let ava = kids.insert_kid(&mut conn, "Ava", "#FF6B6B").await.unwrap();
        let ben = kids.insert_kid(&mut conn, "Ben", "#FF6B6B").await.unwrap();

        let reading = repo.insert_extra_task(&mut conn, ava.id, "Reading").await.unwrap();
        let mut piano = repo.insert_extra_task(&mut conn, ava.id, "Piano").await.unwrap();
        repo.insert_extra_task(&mut conn, ben.id, "Soccer").await.unwrap();

        piano.active = false;
        repo.update_extra_task(&mut conn, &piano).await.unwrap();

        let active = repo.list_active_for_kid(&mut conn, ava.id).await.unwrap();
        assert_eq!(active, vec![reading]);

        let all_ava = repo.list_extra_tasks(&mut conn, Some(ava.id)).await.unwrap();
        assert_eq!(all_ava.len(), 2);

        let everything = repo.list_extra_tasks(&mut conn, None).await.unwrap();
        assert_eq!(everything.len(), 3);
    }
}
