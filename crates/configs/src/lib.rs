//! # configs
//!
//! Layered application configuration: built-in defaults, then an optional
//! `config/portal.toml`, then `PORTAL__SECTION__KEY` environment variables.

use std::collections::HashSet;

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use ip_core::{Role, User};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error(transparent)]
    Source(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset. Default: "info".
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Default: pretty.
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    /// Start with the mock company and student. Default: true.
    #[serde(default = "default_seed_mock_data")]
    pub seed_mock_data: bool,
}

fn default_seed_mock_data() -> bool {
    true
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            seed_mock_data: default_seed_mock_data(),
        }
    }
}

/// A login entry supplied through configuration.
#[derive(Debug, Deserialize)]
pub struct UserCredentialConfig {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
    pub reg_no: Option<String>,
    pub company_name: Option<String>,
    pub technology: Option<String>,
}

impl UserCredentialConfig {
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            reg_no: self.reg_no.clone(),
            company_name: self.company_name.clone(),
            technology: self.technology.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AuthConfig {
    /// Empty means the built-in demo accounts.
    #[serde(default)]
    pub users: Vec<UserCredentialConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::build(File::with_name("config/portal").required(false))
    }

    /// Same layering as `load`, with the file layer taken from a TOML string.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigLoadError> {
        Self::build(File::from_str(toml, FileFormat::Toml))
    }

    fn build<S>(file: S) -> Result<Self, ConfigLoadError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("log.level", default_log_level())?
            .set_default("log.format", "pretty")?
            .set_default("portal.seed_mock_data", default_seed_mock_data())?
            .add_source(file)
            // e.g. PORTAL__LOG__FORMAT=json
            .add_source(Environment::with_prefix("PORTAL").separator("__"))
            .build()?;

        let cfg: AppConfig = settings.try_deserialize()?;
        cfg.validate()?;
        debug!(
            users = cfg.auth.users.len(),
            seed = cfg.portal.seed_mock_data,
            "configuration loaded"
        );
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        let mut emails = HashSet::new();
        for user in &self.auth.users {
            if user.password.expose_secret().is_empty() {
                return Err(ConfigLoadError::Invalid(format!(
                    "user {} has an empty password",
                    user.email
                )));
            }
            if !emails.insert(user.email.as_str()) {
                return Err(ConfigLoadError::Invalid(format!(
                    "duplicate user email {}",
                    user.email
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_file() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.log.format, LogFormat::Pretty);
        assert!(cfg.portal.seed_mock_data);
        assert!(cfg.auth.users.is_empty());
    }

    #[test]
    fn test_users_from_toml() {
        let cfg = AppConfig::from_toml(
            r#"
            [log]
            format = "json"

            [portal]
            seed_mock_data = false

            [[auth.users]]
            id = "01910000-0000-7000-8000-000000000002"
            name = "M.Nauman"
            email = "nauman@admin.com"
            password = "hunter2"
            role = "admin"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.log.format, LogFormat::Json);
        assert!(!cfg.portal.seed_mock_data);
        let user = cfg.auth.users[0].to_user();
        assert_eq!(user.id, ip_core::seed::SEED_ADMIN_ID);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(cfg.auth.users[0].password.expose_secret(), "hunter2");
        assert!(!format!("{:?}", cfg.auth.users[0]).contains("hunter2"));
    }

    #[test]
    fn test_duplicate_emails_rejected() {
        let user = r#"
            [[auth.users]]
            id = "01910000-0000-7000-8000-000000000001"
            name = "A"
            email = "same@student.com"
            password = "x"
            role = "student"
        "#;
        let err = AppConfig::from_toml(&format!("{user}{user}")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_unknown_role_is_a_source_error() {
        let err = AppConfig::from_toml(
            r#"
            [[auth.users]]
            id = "01910000-0000-7000-8000-000000000001"
            name = "A"
            email = "a@b.c"
            password = "x"
            role = "janitor"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Source(_)));
    }
}
