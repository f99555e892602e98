/// Errors surfaced by the domain services.
///
/// NotFound and InvalidInput are reported to the caller as-is. Storage wraps
/// whatever the database layer returned; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    InvalidInput(String),
    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::InvalidInput(message.into())
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(e: sqlx::Error) -> Self {
        DomainError::Storage(e.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
