use anyhow::Result;
use shared::ChoreListName;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::task::ChoreDefinition;

/// Repository for the A/B chore definitions
#[derive(Clone, Default)]
pub struct ChoreRepository;

impl ChoreRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert_chore(
        &self,
        conn: &mut SqliteConnection,
        list_name: ChoreListName,
        chore_name: &str,
    ) -> Result<ChoreDefinition> {
        let result = sqlx::query(
            r#"
            INSERT INTO chore_lists (list_name, chore_name, active)
            VALUES (?, ?, 1)
            "#,
        )
        .bind(list_name.as_str())
        .bind(chore_name)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        self.get_chore(conn, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Chore {} vanished after insert", id))
    }

    pub async fn get_chore(&self, conn: &mut SqliteConnection, chore_id: i64) -> Result<Option<ChoreDefinition>> {
        let row = sqlx::query(
            r#"
            SELECT id, list_name, chore_name, active
            FROM chore_lists
            WHERE id = ?
            "#,
        )
        .bind(chore_id)
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(Self::row_to_chore).transpose()
    }

    /// All chores, active and inactive, optionally restricted to one list
    pub async fn list_chores(
        &self,
        conn: &mut SqliteConnection,
        list_name: Option<ChoreListName>,
    ) -> Result<Vec<ChoreDefinition>> {
        let rows = sqlx::query(
            r#"
            SELECT id, list_name, chore_name, active
            FROM chore_lists
            WHERE ? IS NULL OR list_name = ?
            ORDER BY id ASC
            "#,
        )
        .bind(list_name.map(|l| l.as_str()))
        .bind(list_name.map(|l| l.as_str()))
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(Self::row_to_chore).collect()
    }

    /// Active chores of one list
    pub async fn list_active_chores(
        &self,
        conn: &mut SqliteConnection,
        list_name: ChoreListName,
    ) -> Result<Vec<ChoreDefinition>> {
        let rows = sqlx::query(
            r#"
            SELECT id, list_name, chore_name, active
            FROM chore_lists
            WHERE list_name = ? AND active = 1
            ORDER BY id ASC
            "#,
        )
        .bind(list_name.as_str())
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(Self::row_to_chore).collect()
    }

    pub async fn update_chore(&self, conn: &mut SqliteConnection, chore: &ChoreDefinition) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE chore_lists
            SET list_name = ?, chore_name = ?, active = ?
            WHERE id = ?
            "#,
        )
        .bind(chore.list_name.as_str())
        .bind(&chore.chore_name)
        .bind(chore.active)
        .bind(chore.id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    fn row_to_chore(row: &SqliteRow) -> Result<ChoreDefinition> {
        let list_name: String = row.try_get("list_name")?;
        Ok(ChoreDefinition {
            id: row.try_get("id")?,
            list_name: list_name.parse::<ChoreListName>().map_err(anyhow::Error::msg)?,
            chore_name: row.try_get("chore_name")?,
            active: row.try_get("active")?,
        })
    }
}
