//! Configuration management

use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::*;
use crate::types::IdentifierKind;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub service: ServiceSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Full connection URL; takes precedence over the discrete fields.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Keep users in process memory instead of PostgreSQL (local runs only).
    pub in_memory: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub identifier: IdentifierKind,
    pub list_active_only: bool,
    pub allow_delete: bool,
    pub bcrypt_cost: u32,
    pub photo_url_prefix: String,
    pub photo_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
    pub json: bool,
    pub directory: Option<String>,
}

/// Flat environment variables read before the layered `APP__` scheme existed.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
];

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(&vars)
    }

    /// Builds the configuration from defaults, optional files, and the given
    /// environment snapshot.
    pub fn load_from(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let env = vars
            .get("APP_ENV")
            .cloned()
            .unwrap_or_else(|| "development".into());

        let mut builder = Config::builder()
            .set_default("app.env", env.clone())?
            .set_default("app.name", "usuarios-server")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("database.host", "localhost")?
            .set_default("database.port", i64::from(DEFAULT_DB_PORT))?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "usuarios")?
            .set_default("database.max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .set_default("database.acquire_timeout_secs", DEFAULT_ACQUIRE_TIMEOUT_SECS as i64)?
            .set_default("database.in_memory", false)?
            .set_default("service.identifier", IdentifierKind::default().column())?
            .set_default("service.list_active_only", false)?
            .set_default("service.allow_delete", true)?
            .set_default("service.bcrypt_cost", i64::from(DEFAULT_BCRYPT_COST))?
            .set_default("service.photo_url_prefix", DEFAULT_PHOTO_URL_PREFIX)?
            .set_default("service.photo_dir", DEFAULT_PHOTO_DIR)?
            .set_default("log.filter", "info")?
            .set_default("log.json", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone().into_iter().collect())),
            );

        for (var, key) in LEGACY_ENV_KEYS {
            builder = builder.set_override_option(*key, vars.get(*var).cloned())?;
        }

        builder.build()?.try_deserialize()
    }
}

impl DatabaseSettings {
    /// Connection target without credentials, for log output.
    pub fn display_target(&self) -> String {
        match &self.url {
            Some(_) => "<database.url>".to_string(),
            None => format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::load_from(&HashMap::new()).unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.database.port, DEFAULT_DB_PORT);
        assert_eq!(cfg.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.service.identifier, IdentifierKind::Telefone);
        assert!(!cfg.service.list_active_only);
        assert!(cfg.service.allow_delete);
        assert_eq!(cfg.service.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert!(cfg.database.url.is_none());
        assert!(!cfg.database.in_memory);
    }

    #[test]
    fn test_legacy_env_vars() {
        let cfg = AppConfig::load_from(&vars(&[
            ("PORT", "8081"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_NAME", "cadastro"),
        ]))
        .unwrap();
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.database.host, "db.internal");
        assert_eq!(cfg.database.port, 6543);
        assert_eq!(cfg.database.password, "s3cret");
        assert_eq!(cfg.database.display_target(), "app@db.internal:6543/cadastro");
    }

    #[test]
    fn test_layered_env_vars() {
        let cfg = AppConfig::load_from(&vars(&[
            ("APP__SERVICE__IDENTIFIER", "email"),
            ("APP__SERVICE__LIST_ACTIVE_ONLY", "true"),
            ("APP__SERVICE__ALLOW_DELETE", "false"),
            ("APP__DATABASE__MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();
        assert_eq!(cfg.service.identifier, IdentifierKind::Email);
        assert!(cfg.service.list_active_only);
        assert!(!cfg.service.allow_delete);
        assert_eq!(cfg.database.max_connections, 4);
    }
}
