//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. The merged configuration is validated once at startup and is
//! read-only afterwards.

pub mod app;
pub mod auth;
pub mod logging;
pub mod storage;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Minimum accepted length of the token signing key, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay + `FILEGATE__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential exchange and token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// File storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the `config/` directory.
    pub fn load(env: &str) -> AppResult<Self> {
        Self::load_from(Path::new("config"), env)
    }

    /// Load configuration from `dir`.
    ///
    /// Merges `default.toml` with an environment-specific overlay
    /// (`{env}.toml`) and environment variables prefixed with `FILEGATE__`,
    /// then validates the result.
    pub fn load_from(dir: &Path, env: &str) -> AppResult<Self> {
        let default_file = dir.join("default");
        let env_file = dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::from(default_file.as_path()).required(false))
            .add_source(config::File::from(env_file.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix("FILEGATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values.
    pub fn validate(&self) -> AppResult<()> {
        if self.server.port == 0 {
            return Err(AppError::configuration("server.port cannot be 0"));
        }

        if self.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_LEN} bytes"
            )));
        }

        if self.auth.token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_minutes must be greater than 0",
            ));
        }

        if self.auth.client_id.is_empty() || self.auth.client_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.client_id and auth.client_secret must be set",
            ));
        }

        if self.storage.root_path.trim().is_empty() {
            return Err(AppError::configuration("storage.root_path cannot be empty"));
        }

        if self.storage.max_file_size_mb == 0 {
            return Err(AppError::configuration(
                "storage.max_file_size_mb must be greater than 0",
            ));
        }

        Ok(())
    }
}
