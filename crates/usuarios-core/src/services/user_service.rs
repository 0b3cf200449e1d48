// ============================================================================
// Usuarios Core - User Service
// File: crates/usuarios-core/src/services/user_service.rs
// ============================================================================
//! User record operations: list, fetch, create, update, status, delete

use std::sync::Arc;
use tracing::{info, warn};
use usuarios_security::PasswordService;
use usuarios_shared::constants::DEFAULT_PHOTO_URL_PREFIX;
use usuarios_shared::utils::mask_identifier;
use usuarios_shared::{IdentifierKind, UserId};

use crate::domain::{NewUser, UserChanges, UserProfile, UserStatus};
use crate::error::DomainError;
use crate::normalize::{normalize_identifier, normalize_name};
use crate::repositories::UserRepository;

/// Switches that used to differ between deployments of the service.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub identifier: IdentifierKind,
    pub list_active_only: bool,
    pub allow_delete: bool,
    pub photo_url_prefix: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            identifier: IdentifierKind::default(),
            list_active_only: false,
            allow_delete: true,
            photo_url_prefix: DEFAULT_PHOTO_URL_PREFIX.to_string(),
        }
    }
}

/// Raw create/update payload, before normalization.
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub nome: Option<String>,
    pub identifier: Option<String>,
    pub senha: Option<String>,
}

/// `Full` (PUT) requires name and identifier; `Partial` (PATCH) keeps
/// whatever is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    passwords: PasswordService,
    options: ServiceOptions,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        passwords: PasswordService,
        options: ServiceOptions,
    ) -> Self {
        Self {
            user_repo,
            passwords,
            options,
        }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Storage round trip for health reporting.
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.user_repo.ping().await
    }

    pub async fn list(&self) -> Result<Vec<UserProfile>, DomainError> {
        let users = self.user_repo.list(self.options.list_active_only).await?;
        Ok(users
            .into_iter()
            .map(|u| u.into_profile().with_photo(&self.options.photo_url_prefix))
            .collect())
    }

    pub async fn get(&self, id: UserId) -> Result<UserProfile, DomainError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        Ok(user.into_profile().with_photo(&self.options.photo_url_prefix))
    }

    pub async fn create(&self, input: UserInput) -> Result<UserProfile, DomainError> {
        let kind = self.options.identifier;
        let (Some(nome), Some(identifier), Some(senha)) = (
            present(&input.nome),
            present(&input.identifier),
            password(&input.senha),
        ) else {
            return Err(DomainError::MissingFields(format!(
                "Nome, {} e senha são obrigatórios",
                kind.column()
            )));
        };

        let nome = normalize_name(nome)?;
        let identifier = normalize_identifier(kind, identifier)?;
        let password_hash = self.passwords.hash_blocking(senha.to_string()).await?;

        let created = self
            .user_repo
            .create(&NewUser {
                nome,
                identifier,
                password_hash,
            })
            .await?;

        info!(
            "User created: id={} {}={}",
            created.id,
            kind,
            mask_identifier(&created.identifier)
        );
        Ok(created.into_profile())
    }

    pub async fn update(
        &self,
        id: UserId,
        input: UserInput,
        mode: UpdateMode,
    ) -> Result<UserProfile, DomainError> {
        let kind = self.options.identifier;
        let nome = present(&input.nome);
        let identifier = present(&input.identifier);
        let senha = password(&input.senha);

        match mode {
            UpdateMode::Full if nome.is_none() || identifier.is_none() => {
                return Err(DomainError::MissingFields(format!(
                    "Nome e {} são obrigatórios",
                    kind.column()
                )));
            }
            UpdateMode::Partial if nome.is_none() && identifier.is_none() && senha.is_none() => {
                return Err(DomainError::EmptyUpdate);
            }
            _ => {}
        }

        let nome = nome.map(normalize_name).transpose()?;
        let identifier = identifier
            .map(|raw| normalize_identifier(kind, raw))
            .transpose()?;
        let password_hash = match senha {
            Some(s) => Some(self.passwords.hash_blocking(s.to_string()).await?),
            None => None,
        };
        let changes = UserChanges {
            nome,
            identifier,
            password_hash,
        };

        let updated = self
            .user_repo
            .update(id, &changes)
            .await?
            .ok_or_else(|| {
                warn!("Update failed: user {} not found", id);
                DomainError::UserNotFound
            })?;

        info!(
            "User updated: id={} password_changed={}",
            id,
            changes.password_hash.is_some()
        );
        Ok(updated.into_profile())
    }

    pub async fn update_status(
        &self,
        id: UserId,
        status: Option<i64>,
    ) -> Result<UserStatus, DomainError> {
        let status = status
            .and_then(|s| i16::try_from(s).ok())
            .and_then(UserStatus::from_i16)
            .ok_or(DomainError::InvalidStatus)?;

        if !self.user_repo.update_status(id, status).await? {
            warn!("Status update failed: user {} not found", id);
            return Err(DomainError::UserNotFound);
        }

        info!("User {} status set to {}", id, status.as_i16());
        Ok(status)
    }

    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        if !self.options.allow_delete {
            return Err(DomainError::OperationDisabled("exclusão de usuários"));
        }

        if !self.user_repo.delete(id).await? {
            warn!("Delete failed: user {} not found", id);
            return Err(DomainError::UserNotFound);
        }

        info!("User {} deleted", id);
        Ok(())
    }
}

/// Non-blank text field, trimmed.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Passwords are taken verbatim; only the empty string counts as absent.
fn password(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
