//! Domain errors
//!
//! Display strings of the client-facing variants are sent verbatim in the
//! `error` field of the JSON response.

use thiserror::Error;
use usuarios_shared::IdentifierKind;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    MissingFields(String),

    #[error("Nome inválido")]
    InvalidName,

    #[error("Telefone inválido. Use DDD seguido de 8 ou 9 dígitos, ex: 11912345678")]
    InvalidPhone,

    #[error("Email inválido")]
    InvalidEmail,

    #[error("Status inválido. Use 1 (ativo) ou 0 (inativo)")]
    InvalidStatus,

    #[error("Nenhum campo para atualizar")]
    EmptyUpdate,

    #[error("{} já cadastrado", .0.label())]
    IdentifierAlreadyExists(IdentifierKind),

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("{} não cadastrado", .0.label())]
    UnknownIdentifier(IdentifierKind),

    #[error("Senha incorreta")]
    InvalidCredentials,

    #[error("Usuário inativo")]
    UserNotActive,

    #[error("Operação desabilitada: {0}")]
    OperationDisabled(&'static str),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<usuarios_security::PasswordError> for DomainError {
    fn from(e: usuarios_security::PasswordError) -> Self {
        DomainError::PasswordHashError(e.to_string())
    }
}
