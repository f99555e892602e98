use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::models::error::{DomainError, DomainResult};
use super::models::setting::{Setting, ADMIN_PIN_KEY};
use crate::storage::repositories::SettingRepository;
use crate::storage::DbConnection;

/// Service for key/value application settings
#[derive(Clone)]
pub struct SettingService {
    db: Arc<DbConnection>,
    setting_repo: SettingRepository,
}

impl SettingService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            db,
            setting_repo: SettingRepository::new(),
        }
    }

    pub async fn get_setting(&self, key: &str) -> DomainResult<Setting> {
        let mut conn = self.db.acquire().await?;
        match self.setting_repo.get_setting(&mut conn, key).await? {
            Some(setting) => Ok(setting),
            None => {
                warn!("Setting not found: {}", key);
                Err(DomainError::not_found("Setting", key))
            }
        }
    }

    pub async fn list_settings(&self) -> DomainResult<Vec<Setting>> {
        let mut conn = self.db.acquire().await?;
        Ok(self.setting_repo.list_settings(&mut conn).await?)
    }

    /// Create or overwrite a setting
    pub async fn set_setting(&self, key: &str, value: &str) -> DomainResult<Setting> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::invalid("Setting key cannot be empty"));
        }
        info!("Setting {}", key);

        let mut conn = self.db.acquire().await?;
        Ok(self.setting_repo.upsert_setting(&mut conn, key, value, Utc::now()).await?)
    }

    /// Seed settings that must exist. Existing values are left untouched.
    pub async fn initialize_default_settings(&self, default_admin_pin: &str) -> DomainResult<()> {
        let mut conn = self.db.acquire().await?;
        let inserted = self
            .setting_repo
            .insert_if_missing(&mut conn, ADMIN_PIN_KEY, default_admin_pin, Utc::now())
            .await?;
        if inserted {
            info!("Initialized default setting {}", ADMIN_PIN_KEY);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_service() -> SettingService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        SettingService::new(Arc::new(db))
    }

    #[tokio::test]
    async fn test_defaults_do_not_overwrite() {
        let service = create_test_service().await;

        service.initialize_default_settings("1234").await.unwrap();
        assert_eq!(service.get_setting(ADMIN_PIN_KEY).await.unwrap().value, "1234");

        service.set_setting(ADMIN_PIN_KEY, "4321").await.unwrap();
        service.initialize_default_settings("1234").await.unwrap();
        assert_eq!(service.get_setting(ADMIN_PIN_KEY).await.unwrap().value, "4321");
    }

    #[tokio::test]
    async fn test_set_and_list() {
        let service = create_test_service().await;

        service.set_setting("theme", "dark").await.unwrap();
        service.set_setting("locale", "en").await.unwrap();

        let keys: Vec<String> = service
            .list_settings()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.key)
            .collect();
        assert_eq!(keys, vec!["locale".to_string(), "theme".to_string()]);

        assert!(matches!(
            service.get_setting("missing").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.set_setting("  ", "x").await,
            Err(DomainError::InvalidInput(_))
        ));
    }
}
