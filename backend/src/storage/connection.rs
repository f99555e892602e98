use anyhow::Result;
use sqlx::pool::PoolConnection;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tracing::info;

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check out a single pooled connection for a group of reads
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Begin a transaction; dropped without commit means rollback
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kids (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                color TEXT NOT NULL DEFAULT '#FF6B6B',
                points INTEGER NOT NULL DEFAULT 0,
                current_list TEXT NOT NULL DEFAULT 'A' CHECK (current_list IN ('A', 'B')),
                active BOOLEAN NOT NULL DEFAULT 1
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chore_lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                list_name TEXT NOT NULL CHECK (list_name IN ('A', 'B')),
                chore_name TEXT NOT NULL,
                active BOOLEAN NOT NULL DEFAULT 1
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_chore_lists_list_active
            ON chore_lists(list_name, active);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS extra_tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kid_id INTEGER NOT NULL,
                task_name TEXT NOT NULL,
                active BOOLEAN NOT NULL DEFAULT 1,
                FOREIGN KEY (kid_id) REFERENCES kids (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_extra_tasks_kid_id
            ON extra_tasks(kid_id, active);
            "#,
        )
        .execute(pool)
        .await?;

        // task_id points at chore_lists.id or extra_tasks.id depending on task_type,
        // so it carries no foreign key
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS task_completions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kid_id INTEGER NOT NULL,
                task_type TEXT NOT NULL CHECK (task_type IN ('chore', 'extra')),
                task_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                completed_at TEXT NOT NULL,
                FOREIGN KEY (kid_id) REFERENCES kids (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // At most one record per (kid, type, task, day)
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_task_completions_unique
            ON task_completions(kid_id, task_type, task_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_task_completions_kid_date
            ON task_completions(kid_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL UNIQUE,
                value TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
