//! Startup configuration assembled from environment variables.
//!
//! Everything is read once, through [`mockable::Env`], and validated before the
//! database pool or HTTP server is built. Release builds are strict about the
//! session key; debug builds fall back to dev-friendly defaults with a warning.

use std::path::PathBuf;

use mockable::Env;

use crate::domain::{CredentialSettings, DEFAULT_MEMORY_KIB, DEFAULT_TIME_COST};

mod database;
mod session;

pub use database::DatabaseSettings;
pub use session::SessionSettings;

pub(crate) const API_PORT_ENV: &str = "API_PORT";
pub(crate) const PASSWORD_HASH_COST_ENV: &str = "PASSWORD_HASH_COST";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode used to pick strict or lenient validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing session key material falls back to an ephemeral key.
    Debug,
    /// Session key material must be present and long enough.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub(crate) fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The database connection URL could not be assembled.
    #[error("invalid database connection settings: {message}")]
    DatabaseUrl { message: String },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Fully validated process configuration.
pub struct AppSettings {
    /// Postgres connection and pool settings.
    pub database: DatabaseSettings,
    /// Cookie session settings.
    pub session: SessionSettings,
    /// Password hashing cost.
    pub credentials: CredentialSettings,
    /// TCP port the HTTP server listens on.
    pub api_port: u16,
}

impl AppSettings {
    /// Read and validate every setting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cityinfo::settings::{AppSettings, BuildMode};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "DB_USERNAME" => Some("app".to_owned()),
    ///     "DB_PASSWORD" => Some("secret".to_owned()),
    ///     "DB_HOSTNAME" => Some("localhost".to_owned()),
    ///     "DB_PORT" => Some("5432".to_owned()),
    ///     "DB_DATABASE" => Some("world".to_owned()),
    ///     "API_PORT" => Some("8080".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env, BuildMode::Debug).unwrap();
    /// assert_eq!(settings.api_port, 8080);
    /// ```
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let database = DatabaseSettings::from_env(env)?;
        let api_port = parse_port(env, API_PORT_ENV)?;
        let credentials = credential_settings_from_env(env)?;
        let session = SessionSettings::from_env(env, mode)?;
        Ok(Self {
            database,
            session,
            credentials,
            api_port,
        })
    }
}

fn credential_settings_from_env<E: Env>(env: &E) -> Result<CredentialSettings, ConfigError> {
    let time_cost = match non_empty(env, PASSWORD_HASH_COST_ENV) {
        None => DEFAULT_TIME_COST,
        Some(value) => match value.parse::<u32>() {
            Ok(cost) if cost >= 1 => cost,
            _ => {
                return Err(ConfigError::InvalidEnv {
                    name: PASSWORD_HASH_COST_ENV,
                    value,
                    expected: "an integer >= 1",
                });
            }
        },
    };
    Ok(CredentialSettings {
        time_cost,
        memory_kib: DEFAULT_MEMORY_KIB,
    })
}

/// Read a variable, treating blank values as absent.
fn non_empty<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, ConfigError> {
    non_empty(env, name).ok_or(ConfigError::MissingEnv { name })
}

fn parse_port<E: Env>(env: &E, name: &'static str) -> Result<u16, ConfigError> {
    let value = required(env, name)?;
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value,
            expected: "a port number between 1 and 65535",
        }),
    }
}

fn parse_bool_env<E: Env>(
    env: &E,
    name: &'static str,
    default_value: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = non_empty(env, name) else {
        return Ok(default_value);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}
