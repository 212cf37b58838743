use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Absent secrets are tolerated at startup; signing fails until one is set.
    pub secret: Option<String>,
    pub issuer: String,
    pub audience: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL").ok(),
            host: env_or("DB_HOST", "localhost"),
            port: env_parse("DB_PORT", 5432),
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASSWORD", ""),
            name: env_or("DB_NAME", "postgres"),
            ssl_mode: env_or("DB_SSL_MODE", "prefer"),
            max_connections: env_parse("DB_MAX_CONNECTIONS", 10),
            acquire_timeout_secs: env_parse("DB_ACQUIRE_TIMEOUT_SECS", 5),
        };
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            issuer: env_or("JWT_ISSUER", "cms-backend"),
            audience: env_or("JWT_AUDIENCE", "cms-admin"),
            ttl_hours: env_parse("JWT_TTL_HOURS", 72),
        };
        Ok(Self {
            database,
            jwt,
            host: env_or("API_HOST", "0.0.0.0"),
            port: env_parse("API_PORT", 8080),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DatabaseConfig {
    /// Connection options for the pool. `DATABASE_URL` wins over the discrete
    /// `DB_*` variables when both are present.
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url.parse().context("parse DATABASE_URL");
        }
        let ssl_mode: PgSslMode = self
            .ssl_mode
            .parse()
            .with_context(|| format!("invalid DB_SSL_MODE {:?}", self.ssl_mode))?;
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discrete() -> DatabaseConfig {
        DatabaseConfig {
            url: None,
            host: "db.internal".into(),
            port: 6543,
            user: "cms".into(),
            password: "secret".into(),
            name: "cms".into(),
            ssl_mode: "disable".into(),
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }

    #[test]
    fn discrete_settings_build_connect_options() {
        let opts = discrete().connect_options().expect("valid options");
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_username(), "cms");
        assert_eq!(opts.get_database(), Some("cms"));
    }

    #[test]
    fn database_url_takes_precedence() {
        let mut cfg = discrete();
        cfg.url = Some("postgres://other:pw@elsewhere:5433/content".into());
        let opts = cfg.connect_options().expect("valid url");
        assert_eq!(opts.get_host(), "elsewhere");
        assert_eq!(opts.get_port(), 5433);
        assert_eq!(opts.get_database(), Some("content"));
    }

    #[test]
    fn unknown_ssl_mode_is_rejected() {
        let mut cfg = discrete();
        cfg.ssl_mode = "sometimes".into();
        assert!(cfg.connect_options().is_err());
    }
}
