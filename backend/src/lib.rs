//! # Chore Tracker Backend
//!
//! REST backend for a household chore tracker. Caregivers maintain two shared
//! chore lists (A and B) and per-kid extra tasks; kids mark tasks done per
//! day; finishing every active extra task on a day earns a point.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, axum handlers)
//!     ↓
//! Domain Layer (services, progress engine)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{http::Method, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    ChoreService, CompletionService, ExtraTaskService, KidLocks, KidService, ProgressService, SettingService,
};
use crate::storage::DbConnection;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub kid_service: KidService,
    pub chore_service: ChoreService,
    pub extra_task_service: ExtraTaskService,
    pub progress_service: ProgressService,
    pub completion_service: CompletionService,
    pub setting_service: SettingService,
}

impl AppState {
    /// Wire every service to one database. Kid and completion services share
    /// the per-kid locks.
    pub fn new(db: Arc<DbConnection>) -> Self {
        let locks = KidLocks::new();
        let progress_service = ProgressService::new(db.clone());

        Self {
            kid_service: KidService::new(db.clone(), locks.clone()),
            chore_service: ChoreService::new(db.clone()),
            extra_task_service: ExtraTaskService::new(db.clone()),
            completion_service: CompletionService::new(db.clone(), locks, progress_service.clone()),
            progress_service,
            setting_service: SettingService::new(db),
        }
    }
}

/// Open the database, seed default settings and build the services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = Arc::new(DbConnection::new(&config.database_url).await?);

    info!("Setting up domain services");
    let app_state = AppState::new(db);

    app_state
        .setting_service
        .initialize_default_settings(&config.default_admin_pin)
        .await?;

    Ok(app_state)
}

/// Build the axum router: `/api` routes, CORS, request tracing and an
/// optional static frontend
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let mut router = Router::new().nest("/api", io::rest::router());

    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
