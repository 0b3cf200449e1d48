//! Common types

use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// Column used as the unique login identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    #[serde(alias = "phone")]
    Telefone,
    Email,
}

impl IdentifierKind {
    /// Column name in the `usuarios` table, also the JSON field name.
    pub fn column(&self) -> &'static str {
        match self {
            IdentifierKind::Telefone => "telefone",
            IdentifierKind::Email => "email",
        }
    }

    /// Capitalized name used in client-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            IdentifierKind::Telefone => "Telefone",
            IdentifierKind::Email => "Email",
        }
    }

}

impl Default for IdentifierKind {
    fn default() -> Self {
        IdentifierKind::Telefone
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        kind: IdentifierKind,
    }

    fn parse(value: &str) -> Result<IdentifierKind, config::ConfigError> {
        config::Config::builder()
            .set_override("kind", value)?
            .build()?
            .try_deserialize::<Wrapper>()
            .map(|w| w.kind)
    }

    #[test]
    fn test_identifier_deserialize() {
        assert_eq!(parse("email").unwrap(), IdentifierKind::Email);
        assert_eq!(parse("telefone").unwrap(), IdentifierKind::Telefone);
        assert_eq!(parse("phone").unwrap(), IdentifierKind::Telefone);
        assert!(parse("cpf").is_err());
    }

    #[test]
    fn test_identifier_names() {
        assert_eq!(IdentifierKind::Telefone.column(), "telefone");
        assert_eq!(IdentifierKind::Email.label(), "Email");
        assert_eq!(IdentifierKind::default().to_string(), "telefone");
    }
}
