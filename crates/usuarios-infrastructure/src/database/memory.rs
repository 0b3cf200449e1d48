//! In-process user repository
//!
//! Holds rows in a `BTreeMap` behind a `tokio::sync::RwLock`. Enforces the
//! same identifier uniqueness as the SQL schema. Used for local runs without
//! PostgreSQL and by the HTTP tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use usuarios_core::domain::{NewUser, User, UserChanges, UserStatus};
use usuarios_core::error::DomainError;
use usuarios_core::repositories::UserRepository;
use usuarios_shared::{IdentifierKind, UserId};

struct Table {
    next_id: UserId,
    rows: BTreeMap<UserId, User>,
}

impl Table {
    fn identifier_taken(&self, identifier: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|u| u.identifier == identifier && Some(u.id) != except)
    }
}

pub struct InMemoryUserRepository {
    identifier: IdentifierKind,
    table: RwLock<Table>,
}

impl InMemoryUserRepository {
    pub fn new(identifier: IdentifierKind) -> Self {
        Self {
            identifier,
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn list(&self, only_active: bool) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|u| !only_active || u.status.is_active())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|u| u.identifier == identifier)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        if table.identifier_taken(&user.identifier, None) {
            return Err(DomainError::IdentifierAlreadyExists(self.identifier));
        }

        let id = table.next_id;
        table.next_id += 1;
        let row = User {
            id,
            nome: user.nome.clone(),
            identifier: user.identifier.clone(),
            password_hash: user.password_hash.clone(),
            status: UserStatus::Active,
        };
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> Result<Option<User>, DomainError> {
        let mut table = self.table.write().await;
        if let Some(identifier) = &changes.identifier {
            if table.rows.contains_key(&id) && table.identifier_taken(identifier, Some(id)) {
                return Err(DomainError::IdentifierAlreadyExists(self.identifier));
            }
        }

        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(nome) = &changes.nome {
            row.nome = nome.clone();
        }
        if let Some(identifier) = &changes.identifier {
            row.identifier = identifier.clone();
        }
        if let Some(hash) = &changes.password_hash {
            row.password_hash = hash.clone();
        }
        Ok(Some(row.clone()))
    }

    async fn update_status(&self, id: UserId, status: UserStatus) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                row.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
