//! Request and response payloads
//!
//! Field names follow the public JSON contract (`nome`, `telefone`, `senha`,
//! `fotoUrl`). Requests accept both identifier fields; only the configured
//! one is read.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use usuarios_core::services::UserInput;
use usuarios_core::{UserProfile, UserStatus};
use usuarios_shared::{IdentifierKind, UserId};

#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    pub nome: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
}

impl UserPayload {
    pub fn into_input(self, kind: IdentifierKind) -> UserInput {
        let identifier = match kind {
            IdentifierKind::Telefone => self.telefone,
            IdentifierKind::Email => self.email,
        };
        UserInput {
            nome: self.nome,
            identifier,
            senha: self.senha,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
}

impl LoginPayload {
    pub fn identifier(&self, kind: IdentifierKind) -> Option<&str> {
        match kind {
            IdentifierKind::Telefone => self.telefone.as_deref(),
            IdentifierKind::Email => self.email.as_deref(),
        }
    }
}

/// Status accepts `0`/`1` or `false`/`true`.
#[derive(Debug, Default, Deserialize)]
pub struct StatusPayload {
    pub status: Option<Value>,
}

impl StatusPayload {
    pub fn as_i64(&self) -> Option<i64> {
        match self.status.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: UserId,
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i16>,
    #[serde(rename = "fotoUrl", skip_serializing_if = "Option::is_none")]
    pub foto_url: Option<String>,
}

impl UserResponse {
    pub fn from_profile(profile: UserProfile, kind: IdentifierKind) -> Self {
        let (telefone, email) = match kind {
            IdentifierKind::Telefone => (Some(profile.identifier), None),
            IdentifierKind::Email => (None, Some(profile.identifier)),
        };
        Self {
            id: profile.id,
            nome: profile.nome,
            telefone,
            email,
            status: Some(profile.status.as_i16()),
            foto_url: profile.foto_url,
        }
    }

    /// Update responses echo only id, name and identifier.
    pub fn without_status(mut self) -> Self {
        self.status = None;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub id: UserId,
    pub status: i16,
}

impl StatusResponse {
    pub fn new(id: UserId, status: UserStatus) -> Self {
        Self {
            id,
            status: status.as_i16(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> UserProfile {
        UserProfile {
            id: 3,
            nome: "Ana".to_string(),
            identifier: "11912345678".to_string(),
            status: UserStatus::Active,
            foto_url: Some("/perfis/3.jpg".to_string()),
        }
    }

    #[test]
    fn test_user_response_shape() {
        let body = serde_json::to_value(UserResponse::from_profile(profile(), IdentifierKind::Telefone)).unwrap();
        assert_eq!(
            body,
            json!({"id": 3, "nome": "Ana", "telefone": "11912345678", "status": 1, "fotoUrl": "/perfis/3.jpg"})
        );
        assert!(body.get("senha").is_none());
    }

    #[test]
    fn test_update_response_shape() {
        let mut p = profile();
        p.foto_url = None;
        p.identifier = "ana@example.com".to_string();
        let body = serde_json::to_value(
            UserResponse::from_profile(p, IdentifierKind::Email).without_status(),
        )
        .unwrap();
        assert_eq!(body, json!({"id": 3, "nome": "Ana", "email": "ana@example.com"}));
    }

    #[test]
    fn test_payload_picks_configured_identifier() {
        let payload: UserPayload = serde_json::from_value(json!({
            "nome": "Ana", "telefone": "11912345678", "email": "a@b.com", "senha": "x"
        }))
        .unwrap();
        let input = payload.into_input(IdentifierKind::Email);
        assert_eq!(input.identifier.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_status_payload() {
        let parse = |v: Value| serde_json::from_value::<StatusPayload>(v).unwrap().as_i64();
        assert_eq!(parse(json!({"status": 1})), Some(1));
        assert_eq!(parse(json!({"status": false})), Some(0));
        assert_eq!(parse(json!({"status": "1"})), None);
        assert_eq!(parse(json!({})), None);
    }
}
