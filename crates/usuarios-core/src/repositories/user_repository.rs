//! User repository trait (port)

use async_trait::async_trait;
use usuarios_shared::UserId;

use crate::domain::{NewUser, User, UserChanges, UserStatus};
use crate::error::DomainError;

/// Storage for the `usuarios` table.
///
/// Implementations key lookups on the configured identifier column and map
/// unique violations on it to [`DomainError::IdentifierAlreadyExists`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), DomainError>;
    async fn list(&self, only_active: bool) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError>;
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    /// Returns `None` when no row has `id`.
    async fn update(&self, id: UserId, changes: &UserChanges) -> Result<Option<User>, DomainError>;
    /// Returns `false` when no row has `id`.
    async fn update_status(&self, id: UserId, status: UserStatus) -> Result<bool, DomainError>;
    /// Returns `false` when no row has `id`.
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;
}
