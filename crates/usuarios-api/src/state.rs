use std::path::PathBuf;
use std::sync::Arc;

use usuarios_core::repositories::UserRepository;
use usuarios_core::services::{AuthService, ServiceOptions, UserService};
use usuarios_security::PasswordService;
use usuarios_shared::IdentifierKind;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub auth: Arc<AuthService>,
    pub identifier: IdentifierKind,
    /// Directory served under the photo URL prefix.
    pub photo_dir: PathBuf,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        passwords: PasswordService,
        options: ServiceOptions,
        photo_dir: impl Into<PathBuf>,
    ) -> Self {
        let identifier = options.identifier;
        Self {
            auth: Arc::new(AuthService::new(user_repo.clone(), identifier)),
            users: Arc::new(UserService::new(user_repo, passwords, options)),
            identifier,
            photo_dir: photo_dir.into(),
        }
    }

    pub fn photo_url_prefix(&self) -> &str {
        &self.users.options().photo_url_prefix
    }
}
