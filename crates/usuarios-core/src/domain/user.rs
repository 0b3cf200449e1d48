// ============================================================================
// Usuarios Core - User Entity
// File: crates/usuarios-core/src/domain/user.rs
// Description: Stored user record and the values written to storage
// ============================================================================

use usuarios_shared::constants::{STATUS_ACTIVE, STATUS_INACTIVE};
use usuarios_shared::UserId;

/// Account status; only active users may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_i16(&self) -> i16 {
        match self {
            UserStatus::Active => STATUS_ACTIVE,
            UserStatus::Inactive => STATUS_INACTIVE,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            STATUS_ACTIVE => Some(UserStatus::Active),
            STATUS_INACTIVE => Some(UserStatus::Inactive),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

/// User record as stored, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub nome: String,
    /// Phone digits or lowercased email, depending on the configured identifier.
    pub identifier: String,
    pub password_hash: String,
    pub status: UserStatus,
}

impl User {
    pub fn can_login(&self) -> bool {
        self.status.is_active()
    }

    /// Drops the password hash.
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            nome: self.nome,
            identifier: self.identifier,
            status: self.status,
            foto_url: None,
        }
    }
}

/// User record safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub nome: String,
    pub identifier: String,
    pub status: UserStatus,
    pub foto_url: Option<String>,
}

impl UserProfile {
    pub fn with_photo(mut self, prefix: &str) -> Self {
        self.foto_url = Some(photo_url(prefix, self.id));
        self
    }
}

/// Profile photo path by convention: `{prefix}/{id}.jpg`.
pub fn photo_url(prefix: &str, id: UserId) -> String {
    format!("{}/{}.jpg", prefix.trim_end_matches('/'), id)
}

/// Normalized values for an insert; the hash is already computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub nome: String,
    pub identifier: String,
    pub password_hash: String,
}

/// Column changes for an update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub nome: Option<String>,
    pub identifier: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.identifier.is_none() && self.password_hash.is_none()
    }
}
