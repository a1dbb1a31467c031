use std::fmt;
use std::str::FromStr;
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("unmarshal rds secret: {0}")]
    Secret(#[from] serde_json::Error),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Deserialize)]
struct RdsSecret {
    username: String,
    password: String,
}

/// Connection parameters for the votes database.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: Option<PgSslMode>,
    pub max_connections: u32,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret: RdsSecret = serde_json::from_str(&required("RDS_SECRET")?)?;

        let port = match optional("DB_PORT") {
            Some(value) => parse(&value, "DB_PORT")?,
            None => DEFAULT_PORT,
        };
        let max_connections = match optional("DB_MAX_CONNECTIONS") {
            Some(value) => parse(&value, "DB_MAX_CONNECTIONS")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let ssl_mode = optional("DB_SSL_MODE")
            .map(|value| parse::<PgSslMode>(&value, "DB_SSL_MODE"))
            .transpose()?;

        Ok(Self {
            host: required("RDS_ENDPOINT")?,
            port,
            username: secret.username,
            password: secret.password,
            database: required("DB_NAME")?,
            ssl_mode,
            max_connections,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database);
        match self.ssl_mode {
            Some(mode) => options.ssl_mode(mode),
            None => options,
        }
    }
}

fn parse<T: FromStr>(value: &str, key: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SECRET: &str = r#"{"username":"voter","password":"hunter2"}"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = DbConfig::from_lookup(env(&[
            ("RDS_SECRET", SECRET),
            ("RDS_ENDPOINT", "db.internal"),
            ("DB_NAME", "votes"),
        ]))
        .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.username, "voter");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.database, "votes");
        assert!(config.ssl_mode.is_none());
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_optional_settings() {
        let config = DbConfig::from_lookup(env(&[
            ("RDS_SECRET", SECRET),
            ("RDS_ENDPOINT", "db.internal"),
            ("DB_NAME", "votes"),
            ("DB_SSL_MODE", "require"),
            ("DB_PORT", "6543"),
            ("DB_MAX_CONNECTIONS", "3"),
        ]))
        .unwrap();

        assert!(matches!(config.ssl_mode, Some(PgSslMode::Require)));
        assert_eq!(config.port, 6543);
        assert_eq!(config.max_connections, 3);
    }

    #[test]
    fn test_missing_and_invalid_values() {
        let err = DbConfig::from_lookup(env(&[("RDS_ENDPOINT", "db"), ("DB_NAME", "votes")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("RDS_SECRET")));

        let err = DbConfig::from_lookup(env(&[
            ("RDS_SECRET", "not json"),
            ("RDS_ENDPOINT", "db"),
            ("DB_NAME", "votes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Secret(_)));

        let err = DbConfig::from_lookup(env(&[("RDS_SECRET", SECRET), ("DB_NAME", "votes")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("RDS_ENDPOINT")));

        let err = DbConfig::from_lookup(env(&[
            ("RDS_SECRET", SECRET),
            ("RDS_ENDPOINT", "db"),
            ("DB_NAME", "votes"),
            ("DB_SSL_MODE", "sometimes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_SSL_MODE", .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DbConfig::from_lookup(env(&[
            ("RDS_SECRET", SECRET),
            ("RDS_ENDPOINT", "db.internal"),
            ("DB_NAME", "votes"),
        ]))
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("db.internal"));
    }
}
