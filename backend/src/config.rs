//! Runtime configuration loaded from the environment, with `.env` support.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::http::HeaderValue;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:chores.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_ADMIN_PIN: &str = "1234";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Directory of a built frontend, served for non-API paths when set
    pub static_dir: Option<PathBuf>,
    /// Seeded into the `admin_pin` setting when it does not exist yet
    pub default_admin_pin: String,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid BIND_ADDR: {}", bind_addr))?;

        let cors_origin = get("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = cors_origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS_ORIGIN: {}", cors_origin))?;

        Ok(Self {
            database_url,
            bind_addr,
            cors_origin,
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            default_admin_pin: get("DEFAULT_ADMIN_PIN").unwrap_or_else(|| DEFAULT_ADMIN_PIN.to_string()),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
            static_dir: None,
            default_admin_pin: DEFAULT_ADMIN_PIN.to_string(),
        }
    }
}
