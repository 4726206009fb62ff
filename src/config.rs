//! Application configuration.
//!
//! Layered from `config/default.toml` (optional) and `APP_*` environment
//! variables, with `__` separating nested keys. Secrets get development
//! fallbacks; running in production with the default JWT secret is refused.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const DEV_JWT_SECRET: &str = "dev-secret-change-me-in-production";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,

    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiration_secs")]
    pub jwt_expiration_secs: i64,
    #[serde(default = "default_auth_issuer")]
    pub auth_issuer: String,

    /// "memory" or "json-file".
    #[serde(default = "default_store_backend")]
    pub store_backend: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_true")]
    pub seed_admin: bool,
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_admin_name")]
    pub admin_name: String,

    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default)]
    pub cors_allow_any_origin: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_jwt_secret() -> String {
    DEV_JWT_SECRET.to_string()
}

fn default_jwt_expiration_secs() -> i64 {
    7200
}

fn default_auth_issuer() -> String {
    "swiftmove-api".to_string()
}

fn default_store_backend() -> String {
    "memory".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_true() -> bool {
    true
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_production() && self.jwt_secret == DEV_JWT_SECRET {
            return Err(ConfigError::Message(
                "jwt_secret must be set explicitly in production".to_string(),
            ));
        }
        match self.store_backend.as_str() {
            "memory" | "json-file" => Ok(()),
            other => Err(ConfigError::Message(format!(
                "unknown store backend '{}', expected 'memory' or 'json-file'",
                other
            ))),
        }
    }
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config: AppConfig = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            jwt_secret: default_jwt_secret(),
            jwt_expiration_secs: default_jwt_expiration_secs(),
            auth_issuer: default_auth_issuer(),
            store_backend: default_store_backend(),
            data_dir: default_data_dir(),
            seed_admin: true,
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            admin_name: default_admin_name(),
            cors_allowed_origins: Vec::new(),
            cors_allow_any_origin: false,
        }
    }

    #[test]
    fn development_defaults_validate() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn production_refuses_default_jwt_secret() {
        let mut config = base_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.jwt_secret = "an-actually-configured-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_store_backend_is_rejected() {
        let mut config = base_config();
        config.store_backend = "postgres".to_string();
        assert!(config.validate().is_err());
    }
}
