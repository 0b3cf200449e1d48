// ============================================================================
// Usuarios Core - Authentication Service
// File: crates/usuarios-core/src/services/auth_service.rs
// ============================================================================
//! Login by identifier and password

use std::sync::Arc;
use tracing::{info, warn, error};
use usuarios_security::PasswordService;
use usuarios_shared::utils::mask_identifier;
use usuarios_shared::IdentifierKind;

use crate::domain::UserProfile;
use crate::error::DomainError;
use crate::normalize::lookup_key;
use crate::repositories::UserRepository;

/// Authentication service for the login flow
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    identifier: IdentifierKind,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, identifier: IdentifierKind) -> Self {
        Self {
            user_repo,
            identifier,
        }
    }

    /// Login with identifier and password
    ///
    /// Unknown identifier and wrong password are 401-class errors, an
    /// inactive account is 403-class. The returned profile has no hash.
    pub async fn login(
        &self,
        identifier: Option<&str>,
        password: Option<&str>,
    ) -> Result<UserProfile, DomainError> {
        let kind = self.identifier;
        let (Some(identifier), Some(password)) = (
            identifier.map(str::trim).filter(|s| !s.is_empty()),
            password.filter(|s| !s.is_empty()),
        ) else {
            return Err(DomainError::MissingFields(format!(
                "{} e senha são obrigatórios",
                kind.label()
            )));
        };

        let key = lookup_key(kind, identifier);
        let masked = mask_identifier(&key);
        info!("Login attempt for {}: {}", kind, masked);

        // 1. Find user by identifier
        let user = self
            .user_repo
            .find_by_identifier(&key)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: {} not found: {}", kind, masked);
                DomainError::UnknownIdentifier(kind)
            })?;

        // 2. Check if user can login
        if !user.can_login() {
            warn!("Login failed: user {} is inactive", user.id);
            return Err(DomainError::UserNotActive);
        }

        // 3. Verify password
        let valid = PasswordService::verify_blocking(password.to_string(), user.password_hash.clone())
            .await
            .unwrap_or_else(|e| {
                error!("Stored hash for user {} could not be verified: {}", user.id, e);
                false
            });

        if !valid {
            warn!("Login failed: invalid password for user {}", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        info!("Login successful for user {}", user.id);
        Ok(user.into_profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserStatus};
    use crate::repositories::MockUserRepository;

    fn user_with(password: &str, status: UserStatus) -> User {
        User {
            id: 10,
            nome: "Carla Dias".to_string(),
            identifier: "11912345678".to_string(),
            password_hash: PasswordService::new(4).unwrap().hash(password).unwrap(),
            status,
        }
    }

    fn service_returning(user: Option<User>) -> AuthService {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_identifier()
            .withf(|identifier: &str| identifier == "11912345678")
            .returning(move |_| Ok(user.clone()));
        AuthService::new(Arc::new(repo), IdentifierKind::Telefone)
    }

    #[tokio::test]
    async fn test_login_success_strips_hash() {
        let svc = service_returning(Some(user_with("segredo", UserStatus::Active)));
        let profile = svc
            .login(Some("(11) 91234-5678"), Some("segredo"))
            .await
            .unwrap();
        assert_eq!(profile.id, 10);
        assert_eq!(profile.nome, "Carla Dias");
        assert_eq!(profile.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let svc = service_returning(Some(user_with("segredo", UserStatus::Active)));
        let err = svc.login(Some("11912345678"), Some("errada")).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_inactive_user() {
        let svc = service_returning(Some(user_with("segredo", UserStatus::Inactive)));
        let err = svc.login(Some("11912345678"), Some("segredo")).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotActive));
    }

    #[tokio::test]
    async fn test_login_unknown_identifier() {
        let svc = service_returning(None);
        let err = svc.login(Some("11912345678"), Some("segredo")).await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownIdentifier(IdentifierKind::Telefone)));
        assert_eq!(err.to_string(), "Telefone não cadastrado");
    }

    #[tokio::test]
    async fn test_login_malformed_hash_is_mismatch() {
        let mut user = user_with("segredo", UserStatus::Active);
        user.password_hash = "plaintext".to_string();
        let svc = service_returning(Some(user));
        let err = svc.login(Some("11912345678"), Some("plaintext")).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_identifier().never();
        let svc = AuthService::new(Arc::new(repo), IdentifierKind::Email);
        let err = svc.login(Some("a@b.com"), None).await.unwrap_err();
        assert_eq!(err.to_string(), "Email e senha são obrigatórios");
    }
}
