// ============================================================================
// Usuarios Infrastructure - PostgreSQL User Repository
// File: crates/usuarios-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use usuarios_core::domain::{NewUser, User, UserChanges, UserStatus};
use usuarios_core::error::DomainError;
use usuarios_core::repositories::UserRepository;
use usuarios_shared::{IdentifierKind, UserId};

pub struct PgUserRepository {
    pool: PgPool,
    identifier: IdentifierKind,
    queries: Queries,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, identifier: IdentifierKind) -> Self {
        Self {
            pool,
            identifier,
            queries: Queries::for_column(identifier.column()),
        }
    }

    fn map_write_error(&self, op: &str, e: sqlx::Error) -> DomainError {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                info!("Duplicate {} rejected on {}", self.identifier, op);
                DomainError::IdentifierAlreadyExists(self.identifier)
            }
            _ => {
                error!("Database error on {}: {}", op, e);
                DomainError::DatabaseError(e.to_string())
            }
        }
    }
}

fn map_read_error(op: &str, e: sqlx::Error) -> DomainError {
    error!("Database error on {}: {}", op, e);
    DomainError::DatabaseError(e.to_string())
}

/// SQL text with the identifier column spliced in once, at construction.
/// The column name comes from [`IdentifierKind::column`], never from input.
struct Queries {
    list: String,
    find_by_id: String,
    find_by_identifier: String,
    insert: String,
    update: String,
}

impl Queries {
    fn for_column(col: &str) -> Self {
        let returning = format!("id, nome, {col} AS identifier, senha, status");
        Self {
            list: format!(
                "SELECT {returning} FROM usuarios WHERE ($1 = FALSE OR status = 1) ORDER BY id"
            ),
            find_by_id: format!("SELECT {returning} FROM usuarios WHERE id = $1"),
            find_by_identifier: format!("SELECT {returning} FROM usuarios WHERE {col} = $1"),
            insert: format!(
                "INSERT INTO usuarios (nome, {col}, senha, status) VALUES ($1, $2, $3, 1) RETURNING {returning}"
            ),
            update: format!(
                r#"
                UPDATE usuarios
                SET
                    nome = COALESCE($2, nome),
                    {col} = COALESCE($3, {col}),
                    senha = COALESCE($4, senha)
                WHERE id = $1
                RETURNING {returning}
                "#
            ),
        }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: i64,
    pub nome: String,
    pub identifier: Option<String>,
    pub senha: String,
    pub status: i16,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            nome: row.nome,
            identifier: row.identifier.unwrap_or_default(),
            password_hash: row.senha,
            status: if row.status == 0 {
                UserStatus::Inactive
            } else {
                UserStatus::Active
            },
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| map_read_error("ping", e))
    }

    async fn list(&self, only_active: bool) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&self.queries.list)
            .bind(only_active)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error("list users", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&self.queries.find_by_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("find user by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&self.queries.find_by_identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("find user by identifier", e))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(&self.queries.insert)
            .bind(&user.nome)
            .bind(&user.identifier)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.map_write_error("create user", e))?;

        Ok(row.into())
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&self.queries.update)
            .bind(id)
            .bind(&changes.nome)
            .bind(&changes.identifier)
            .bind(&changes.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| self.map_write_error("update user", e))?;

        Ok(row.map(Into::into))
    }

    async fn update_status(&self, id: UserId, status: UserStatus) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE usuarios SET status = $1 WHERE id = $2")
            .bind(status.as_i16())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_read_error("update user status", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_read_error("delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_use_identifier_column() {
        let q = Queries::for_column("email");
        assert!(q.find_by_identifier.ends_with("WHERE email = $1"));
        assert!(q.insert.contains("(nome, email, senha, status)"));
        assert!(q.update.contains("email = COALESCE($3, email)"));
        assert!(q.list.contains("email AS identifier"));
    }

    #[test]
    fn test_row_status_mapping() {
        let row = |status| UserRow {
            id: 1,
            nome: "Ana".to_string(),
            identifier: None,
            senha: "h".to_string(),
            status,
        };
        assert_eq!(User::from(row(0)).status, UserStatus::Inactive);
        assert_eq!(User::from(row(1)).status, UserStatus::Active);
        assert_eq!(User::from(row(1)).identifier, "");
    }
}
