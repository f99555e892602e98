use anyhow::Result;
use shared::ChoreListName;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::kid::Kid;

/// Repository for kid rows
#[derive(Clone, Default)]
pub struct KidRepository;

impl KidRepository {
    pub fn new() -> Self {
        Self
    }

    /// Insert a kid with zero points on list A and return the stored row
    pub async fn insert_kid(&self, conn: &mut SqliteConnection, name: &str, color: &str) -> Result<Kid> {
        let result = sqlx::query(
            r#"
            INSERT INTO kids (name, color)
            VALUES (?, ?)
            "#,
        )
        .bind(name)
        .bind(color)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        self.get_kid(conn, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Kid {} vanished after insert", id))
    }

    /// Get a kid by ID, active or not
    pub async fn get_kid(&self, conn: &mut SqliteConnection, kid_id: i64) -> Result<Option<Kid>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, color, points, current_list, active
            FROM kids
            WHERE id = ?
            "#,
        )
        .bind(kid_id)
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(Self::row_to_kid).transpose()
    }

    /// List kids ordered by ID
    pub async fn list_kids(&self, conn: &mut SqliteConnection, include_inactive: bool) -> Result<Vec<Kid>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, color, points, current_list, active
            FROM kids
            WHERE active = 1 OR ?
            ORDER BY id ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(Self::row_to_kid).collect()
    }

    /// Persist name, color, list and active flag. Points are left alone.
    pub async fn update_kid(&self, conn: &mut SqliteConnection, kid: &Kid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE kids
            SET name = ?, color = ?, current_list = ?, active = ?
            WHERE id = ?
            "#,
        )
        .bind(&kid.name)
        .bind(&kid.color)
        .bind(kid.current_list.as_str())
        .bind(kid.active)
        .bind(kid.id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Add a signed delta to the kid's points in one statement.
    /// Returns false if the kid does not exist.
    pub async fn add_points(&self, conn: &mut SqliteConnection, kid_id: i64, delta: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE kids SET points = points + ? WHERE id = ?
            "#,
        )
        .bind(delta)
        .bind(kid_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// No-op write on the kid's row. Inside a transaction this takes the
    /// write lock before any reads, so a read-then-write bracket cannot
    /// deadlock against another writer. Returns false if the kid does not exist.
    pub async fn lock_kid_row(&self, conn: &mut SqliteConnection, kid_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE kids SET points = points WHERE id = ?
            "#,
        )
        .bind(kid_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip every kid's current list between A and B
    pub async fn switch_all_lists(&self, conn: &mut SqliteConnection) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE kids
            SET current_list = CASE current_list WHEN 'A' THEN 'B' ELSE 'A' END
            "#,
        )
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    fn row_to_kid(row: &SqliteRow) -> Result<Kid> {
        let current_list: String = row.try_get("current_list")?;
        Ok(Kid {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            color: row.try_get("color")?,
            points: row.try_get("points")?,
            current_list: current_list.parse::<ChoreListName>().map_err(anyhow::Error::msg)?,
            active: row.try_get("active")?,
        })
    }
}
