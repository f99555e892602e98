use std::sync::Arc;

use shared::ChoreListName;
use tracing::{info, warn};

use super::commands::chore::{CreateChoreCommand, UpdateChoreCommand};
use super::models::error::{DomainError, DomainResult};
use super::models::task::ChoreDefinition;
use super::validation::validate_name;
use crate::storage::repositories::{ChoreRepository, KidRepository};
use crate::storage::DbConnection;

/// Service for the shared A/B chore lists
#[derive(Clone)]
pub struct ChoreService {
    db: Arc<DbConnection>,
    chore_repo: ChoreRepository,
    kid_repo: KidRepository,
}

impl ChoreService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            db,
            chore_repo: ChoreRepository::new(),
            kid_repo: KidRepository::new(),
        }
    }

    pub async fn add_chore(&self, command: CreateChoreCommand) -> DomainResult<ChoreDefinition> {
        info!("Adding chore '{}' to list {}", command.chore_name, command.list_name);

        let name = validate_name("Chore name", &command.chore_name)?;
        let mut conn = self.db.acquire().await?;
        let chore = self.chore_repo.insert_chore(&mut conn, command.list_name, &name).await?;

        info!("Created chore {} on list {}", chore.id, chore.list_name);
        Ok(chore)
    }

    /// All chores including inactive ones, optionally for one list
    pub async fn list_chores(&self, list_name: Option<ChoreListName>) -> DomainResult<Vec<ChoreDefinition>> {
        let mut conn = self.db.acquire().await?;
        Ok(self.chore_repo.list_chores(&mut conn, list_name).await?)
    }

    pub async fn get_active_chore_list(&self, list_name: ChoreListName) -> DomainResult<Vec<ChoreDefinition>> {
        let mut conn = self.db.acquire().await?;
        Ok(self.chore_repo.list_active_chores(&mut conn, list_name).await?)
    }

    /// Active chores of the list the kid is currently on
    pub async fn get_kid_active_chores(&self, kid_id: i64) -> DomainResult<Vec<ChoreDefinition>> {
        let mut conn = self.db.acquire().await?;
        let kid = self
            .kid_repo
            .get_kid(&mut conn, kid_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Kid", kid_id))?;
        Ok(self.chore_repo.list_active_chores(&mut conn, kid.current_list).await?)
    }

    pub async fn update_chore(&self, chore_id: i64, command: UpdateChoreCommand) -> DomainResult<ChoreDefinition> {
        info!("Updating chore: {}", chore_id);

        let mut conn = self.db.acquire().await?;
        let mut chore = self.require_chore(&mut conn, chore_id).await?;

        if let Some(list_name) = command.list_name {
            chore.list_name = list_name;
        }
        if let Some(name) = command.chore_name {
            chore.chore_name = validate_name("Chore name", &name)?;
        }
        if let Some(active) = command.active {
            chore.active = active;
        }

        self.chore_repo.update_chore(&mut conn, &chore).await?;
        Ok(chore)
    }

    /// Soft delete. Existing ledger rows keep pointing at the chore.
    pub async fn deactivate_chore(&self, chore_id: i64) -> DomainResult<ChoreDefinition> {
        info!("Deactivating chore: {}", chore_id);
        self.update_chore(
            chore_id,
            UpdateChoreCommand {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    async fn require_chore(&self, conn: &mut sqlx::SqliteConnection, chore_id: i64) -> DomainResult<ChoreDefinition> {
        match self.chore_repo.get_chore(conn, chore_id).await? {
            Some(chore) => Ok(chore),
            None => {
                warn!("Chore not found: {}", chore_id);
                Err(DomainError::not_found("Chore", chore_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::kid::{CreateKidCommand, UpdateKidCommand};
    use crate::domain::kid_locks::KidLocks;
    use crate::domain::kid_service::KidService;

    async fn create_test_services() -> (ChoreService, KidService) {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        (ChoreService::new(db.clone()), KidService::new(db, KidLocks::new()))
    }

    fn chore(list_name: ChoreListName, name: &str) -> CreateChoreCommand {
        CreateChoreCommand {
            list_name,
            chore_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_kid_sees_chores_of_current_list() {
        let (chores, kids) = create_test_services().await;
        let dishes = chores.add_chore(chore(ChoreListName::A, "Dishes")).await.unwrap();
        let trash = chores.add_chore(chore(ChoreListName::B, "Trash")).await.unwrap();
        let kid = kids
            .create_kid(CreateKidCommand {
                name: "Ava".to_string(),
                color: None,
            })
            .await
            .unwrap();

        assert_eq!(chores.get_kid_active_chores(kid.id).await.unwrap(), vec![dishes]);

        kids.update_kid(
            kid.id,
            UpdateKidCommand {
                current_list: Some(ChoreListName::B),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(chores.get_kid_active_chores(kid.id).await.unwrap(), vec![trash]);

        let missing = chores.get_kid_active_chores(999).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_deactivate_chore_keeps_it_listed() {
        let (chores, _) = create_test_services().await;
        let dishes = chores.add_chore(chore(ChoreListName::A, "Dishes")).await.unwrap();

        let deactivated = chores.deactivate_chore(dishes.id).await.unwrap();
        assert!(!deactivated.active);

        assert!(chores.get_active_chore_list(ChoreListName::A).await.unwrap().is_empty());
        assert_eq!(chores.list_chores(Some(ChoreListName::A)).await.unwrap(), vec![deactivated]);
    }

    #[tokio::test]
    async fn test_update_chore_validation_and_not_found() {
        let (chores, _) = create_test_services().await;
        let dishes = chores.add_chore(chore(ChoreListName::A, "Dishes")).await.unwrap();

        let blank = chores
            .update_chore(
                dishes.id,
                UpdateChoreCommand {
                    chore_name: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(blank, Err(DomainError::InvalidInput(_))));

        let missing = chores.deactivate_chore(dishes.id + 1).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));

        let empty = chores.add_chore(chore(ChoreListName::B, "")).await;
        assert!(matches!(empty, Err(DomainError::InvalidInput(_))));
    }
}
