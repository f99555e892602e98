use std::sync::Arc;

use tracing::{info, warn};

use super::commands::kid::{AwardPointsCommand, CreateKidCommand, UpdateKidCommand};
use super::kid_locks::KidLocks;
use super::models::error::{DomainError, DomainResult};
use super::models::kid::{Kid, DEFAULT_KID_COLOR};
use super::validation::{validate_color, validate_name};
use crate::storage::repositories::KidRepository;
use crate::storage::DbConnection;

/// Service for managing kids, their points and list rotation
#[derive(Clone)]
pub struct KidService {
    db: Arc<DbConnection>,
    locks: KidLocks,
    kid_repo: KidRepository,
}

impl KidService {
    pub fn new(db: Arc<DbConnection>, locks: KidLocks) -> Self {
        Self {
            db,
            locks,
            kid_repo: KidRepository::new(),
        }
    }

    /// Create a kid with zero points on list A
    pub async fn create_kid(&self, command: CreateKidCommand) -> DomainResult<Kid> {
        info!("Creating kid: name={}", command.name);

        let name = validate_name("Kid name", &command.name)?;
        let color = match command.color {
            Some(color) => validate_color(&color)?,
            None => DEFAULT_KID_COLOR.to_string(),
        };

        let mut conn = self.db.acquire().await?;
        let kid = self.kid_repo.insert_kid(&mut conn, &name, &color).await?;

        info!("Created kid: {} with ID: {}", kid.name, kid.id);
        Ok(kid)
    }

    /// Get a kid by ID, whether active or not
    pub async fn get_kid(&self, kid_id: i64) -> DomainResult<Kid> {
        let mut conn = self.db.acquire().await?;
        match self.kid_repo.get_kid(&mut conn, kid_id).await? {
            Some(kid) => Ok(kid),
            None => {
                warn!("Kid not found: {}", kid_id);
                Err(DomainError::not_found("Kid", kid_id))
            }
        }
    }

    /// Active kids ordered by ID
    pub async fn list_kids(&self) -> DomainResult<Vec<Kid>> {
        let mut conn = self.db.acquire().await?;
        let kids = self.kid_repo.list_kids(&mut conn, false).await?;
        info!("Found {} kids", kids.len());
        Ok(kids)
    }

    /// Apply a partial update. The read and the write share one
    /// transaction, so a concurrent list switch is never overwritten.
    pub async fn update_kid(&self, kid_id: i64, command: UpdateKidCommand) -> DomainResult<Kid> {
        info!("Updating kid: {}", kid_id);

        let name = command.name.map(|name| validate_name("Kid name", &name)).transpose()?;
        let color = command.color.map(|color| validate_color(&color)).transpose()?;

        let kid = self
            .modify_kid(kid_id, |kid| {
                if let Some(name) = name {
                    kid.name = name;
                }
                if let Some(color) = color {
                    kid.color = color;
                }
                if let Some(list) = command.current_list {
                    kid.current_list = list;
                }
            })
            .await?;

        info!("Updated kid: {} with ID: {}", kid.name, kid.id);
        Ok(kid)
    }

    /// Soft delete. The kid's ledger rows and extra tasks are kept.
    pub async fn deactivate_kid(&self, kid_id: i64) -> DomainResult<Kid> {
        info!("Deactivating kid: {}", kid_id);
        self.modify_kid(kid_id, |kid| kid.active = false).await
    }

    /// Apply a signed delta to a kid's points. No floor is applied.
    pub async fn award_points(&self, command: AwardPointsCommand) -> DomainResult<Kid> {
        info!("Awarding {} points to kid {}", command.points, command.kid_id);

        let _guard = self.locks.lock(command.kid_id).await;
        let mut conn = self.db.acquire().await?;

        if !self.kid_repo.add_points(&mut conn, command.kid_id, command.points).await? {
            warn!("Kid not found for award: {}", command.kid_id);
            return Err(DomainError::not_found("Kid", command.kid_id));
        }

        let kid = self
            .kid_repo
            .get_kid(&mut conn, command.kid_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Kid", command.kid_id))?;

        info!("Kid {} now has {} points", kid.id, kid.points);
        Ok(kid)
    }

    /// Flip every kid between list A and B in one statement.
    /// Returns the active kids after the switch.
    pub async fn switch_lists(&self) -> DomainResult<Vec<Kid>> {
        let mut conn = self.db.acquire().await?;
        let switched = self.kid_repo.switch_all_lists(&mut conn).await?;
        info!("Switched chore lists for {} kids", switched);

        Ok(self.kid_repo.list_kids(&mut conn, false).await?)
    }

    async fn modify_kid(&self, kid_id: i64, apply: impl FnOnce(&mut Kid)) -> DomainResult<Kid> {
        let mut tx = self.db.begin().await?;

        // Takes the write lock before the read
        if !self.kid_repo.lock_kid_row(&mut tx, kid_id).await? {
            warn!("Kid not found: {}", kid_id);
            return Err(DomainError::not_found("Kid", kid_id));
        }
        let mut kid = self
            .kid_repo
            .get_kid(&mut tx, kid_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Kid", kid_id))?;

        apply(&mut kid);
        self.kid_repo.update_kid(&mut tx, &kid).await?;
        tx.commit().await?;
        Ok(kid)
    }
}
