use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::setting::Setting;
use crate::storage::{format_timestamp, parse_timestamp};

/// Key/value application settings
#[derive(Clone, Default)]
pub struct SettingRepository;

impl SettingRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_setting(&self, conn: &mut SqliteConnection, key: &str) -> Result<Option<Setting>> {
        let row = sqlx::query(
            r#"
            SELECT key, value, created_at, updated_at
            FROM settings
            WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(Self::row_to_setting).transpose()
    }

    pub async fn list_settings(&self, conn: &mut SqliteConnection) -> Result<Vec<Setting>> {
        let rows = sqlx::query(
            r#"
            SELECT key, value, created_at, updated_at
            FROM settings
            ORDER BY key ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(Self::row_to_setting).collect()
    }

    /// Insert or overwrite a value. `created_at` is kept on overwrite.
    pub async fn upsert_setting(
        &self,
        conn: &mut SqliteConnection,
        key: &str,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<Setting> {
        let now = format_timestamp(now);
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&mut *conn)
        .await?;

        self.get_setting(conn, key)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Setting {} vanished after upsert", key))
    }

    /// Insert only if the key is absent. Returns true if a row was written.
    pub async fn insert_if_missing(
        &self,
        conn: &mut SqliteConnection,
        key: &str,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let now = format_timestamp(now);
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO settings (key, value, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_setting(row: &SqliteRow) -> Result<Setting> {
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;
        Ok(Setting {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }
}
