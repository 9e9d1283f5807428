//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for deployment-specific values like `DATABASE_URL` and `AUTH_TOKEN_SECRET`.
//!
//! # Example
//!
//! ```no_run
//! use seafood_api::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::auth::AuthConfig;
use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::smtp::SmtpConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `[database].url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the bearer-token signing secret.
pub const TOKEN_SECRET_ENV: &str = "AUTH_TOKEN_SECRET";

/// Environment variables for the SMTP relay.
pub const SMTP_HOST_ENV: &str = "SMTP_HOST";
pub const SMTP_PORT_ENV: &str = "SMTP_PORT";
pub const SMTP_USER_ENV: &str = "SMTP_USER";
pub const SMTP_PASS_ENV: &str = "SMTP_PASS";
pub const SMTP_FROM_ENV: &str = "SMTP_FROM";

/// Main application configuration.
///
/// Every section is optional in the file; missing sections take their
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite location and pool limits.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Credential and password-reset settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Mail relay for password-reset links.
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Config {
    /// Parse configuration from TOML content and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when given, otherwise `config.toml` if it exists, otherwise
    /// defaults plus environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new("config.toml").exists() => Self::load("config.toml"),
            None => Self::parse_toml(""),
        }
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Signing secret for bearer tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `AUTH_TOKEN_SECRET` is unset
    /// or blank.
    #[allow(clippy::result_large_err)]
    pub fn token_secret(&self) -> Result<&str> {
        self.auth
            .token_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingField {
                    field: TOKEN_SECRET_ENV,
                }
                .into()
            })
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.database.url = url;
        }
        self.auth.token_secret = lookup(TOKEN_SECRET_ENV);

        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(host) = present(SMTP_HOST_ENV) {
            self.smtp.host = Some(host);
        }
        if let Some(port) = present(SMTP_PORT_ENV) {
            // An unparseable port becomes 0 and fails validation.
            self.smtp.port = port.trim().parse().unwrap_or(0);
        }
        if let Some(from) = present(SMTP_FROM_ENV) {
            self.smtp.from = Some(from);
        }
        self.smtp.username = present(SMTP_USER_ENV);
        self.smtp.password = present(SMTP_PASS_ENV);
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "url" }.into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_connections",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.database.min_idle > self.database.max_connections {
            return Err(ConfigError::InvalidValue {
                field: "min_idle",
                reason: "must be <= max_connections".to_string(),
            }
            .into());
        }
        if self.database.max_lifetime_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_lifetime_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "token_ttl_hours",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.auth.reset_token_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "reset_token_ttl_minutes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "bcrypt_cost",
                reason: "must be between 4 and 31".to_string(),
            }
            .into());
        }
        if self.smtp.is_enabled() {
            if self.smtp.port == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "port",
                    reason: "SMTP port must be between 1 and 65535".to_string(),
                }
                .into());
            }
            if self.smtp.sender().is_none() {
                return Err(ConfigError::MissingField { field: SMTP_FROM_ENV }.into());
            }
        }
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(|_| None);
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.base_path, "");
        assert_eq!(config.database.url, "seafood.db");
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.database.min_idle, 5);
        assert_eq!(config.database.max_lifetime_secs, 300);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.auth.reset_token_ttl_minutes, 60);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse(
            r#"
[server]
bind = "127.0.0.1:9000"
base_path = "/api/v1"

[database]
url = "/tmp/market.db"
max_connections = 4
min_idle = 1

[auth]
bcrypt_cost = 4
frontend_url = "https://app.example.com"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.server.base_path, "/api/v1");
        assert_eq!(config.database.url, "/tmp/market.db");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.auth.bcrypt_cost, 4);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn env_overrides_database_url_and_secret() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            DATABASE_URL_ENV => Some("/data/prod.db".into()),
            TOKEN_SECRET_ENV => Some("s3cret".into()),
            _ => None,
        });
        assert_eq!(config.database.url, "/data/prod.db");
        assert_eq!(config.token_secret().unwrap(), "s3cret");
    }

    #[test]
    fn missing_secret_is_reported() {
        let config = parse("").unwrap();
        match config.token_secret() {
            Err(Error::Config(ConfigError::MissingField { field })) => {
                assert_eq!(field, TOKEN_SECRET_ENV);
            }
            other => panic!("expected missing secret, got {other:?}"),
        }
    }

    #[test]
    fn rejects_min_idle_above_max() {
        let result = parse("[database]\nmax_connections = 2\nmin_idle = 3\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "min_idle",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = parse("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "format",
                ..
            }))
        ));
    }

    #[test]
    fn smtp_is_off_by_default() {
        let config = parse("").unwrap();
        assert!(!config.smtp.is_enabled());
        assert_eq!(config.smtp.port, 587);
    }

    #[test]
    fn env_configures_smtp() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            SMTP_HOST_ENV => Some("smtp.example.com".into()),
            SMTP_PORT_ENV => Some("2525".into()),
            SMTP_USER_ENV => Some("mailer@example.com".into()),
            SMTP_PASS_ENV => Some("hunter22".into()),
            _ => None,
        });
        config.validate().unwrap();
        assert!(config.smtp.is_enabled());
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.smtp.sender(), Some("mailer@example.com"));
        assert_eq!(
            config.smtp.credentials(),
            Some(("mailer@example.com", "hunter22"))
        );
    }

    #[test]
    fn smtp_host_needs_a_sender() {
        let result = parse("[smtp]\nhost = \"smtp.example.com\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: SMTP_FROM_ENV
            }))
        ));
    }

    #[test]
    fn bad_smtp_port_is_rejected() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            SMTP_HOST_ENV => Some("smtp.example.com".into()),
            SMTP_PORT_ENV => Some("submission".into()),
            SMTP_FROM_ENV => Some("noreply@example.com".into()),
            _ => None,
        });
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue { field: "port", .. }))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = parse("[server\nbind = 1");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
