//! Database connection settings.

use mockable::Env;
use url::Url;
use zeroize::Zeroizing;

use super::{ConfigError, non_empty, parse_port, required};

const USERNAME_ENV: &str = "DB_USERNAME";
const PASSWORD_ENV: &str = "DB_PASSWORD";
const HOSTNAME_ENV: &str = "DB_HOSTNAME";
const PORT_ENV: &str = "DB_PORT";
const DATABASE_ENV: &str = "DB_DATABASE";
const POOL_MAX_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Where and how to reach Postgres.
pub struct DatabaseSettings {
    pub username: String,
    pub password: Zeroizing<String>,
    pub hostname: String,
    pub port: u16,
    pub database: String,
    /// Upper bound on pooled connections.
    pub pool_max_size: u32,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}

impl DatabaseSettings {
    pub(super) fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let username = required(env, USERNAME_ENV)?;
        let password = Zeroizing::new(required(env, PASSWORD_ENV)?);
        let hostname = required(env, HOSTNAME_ENV)?;
        let port = parse_port(env, PORT_ENV)?;
        let database = required(env, DATABASE_ENV)?;
        let pool_max_size = match non_empty(env, POOL_MAX_SIZE_ENV) {
            None => DEFAULT_POOL_MAX_SIZE,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: POOL_MAX_SIZE_ENV,
                        value,
                        expected: "a positive integer",
                    });
                }
            },
        };

        Ok(Self {
            username,
            password,
            hostname,
            port,
            database,
            pool_max_size,
        })
    }

    /// Render a `postgres://` URL with credentials percent-encoded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cityinfo::settings::DatabaseSettings;
    /// use zeroize::Zeroizing;
    ///
    /// let settings = DatabaseSettings {
    ///     username: "app".to_owned(),
    ///     password: Zeroizing::new("p@ss word".to_owned()),
    ///     hostname: "db".to_owned(),
    ///     port: 5432,
    ///     database: "world".to_owned(),
    ///     pool_max_size: 10,
    /// };
    /// assert_eq!(
    ///     settings.connection_url().unwrap().as_str(),
    ///     "postgres://app:p%40ss%20word@db:5432/world"
    /// );
    /// ```
    pub fn connection_url(&self) -> Result<Zeroizing<String>, ConfigError> {
        let invalid = |message: String| ConfigError::DatabaseUrl { message };
        let mut url = Url::parse(&format!("postgres://{}", self.hostname))
            .map_err(|err| invalid(format!("hostname '{}': {err}", self.hostname)))?;
        url.set_username(&self.username)
            .map_err(|()| invalid("username cannot be encoded".to_owned()))?;
        url.set_password(Some(self.password.as_str()))
            .map_err(|()| invalid("password cannot be encoded".to_owned()))?;
        url.set_port(Some(self.port))
            .map_err(|()| invalid("port cannot be set".to_owned()))?;
        url.set_path(&self.database);
        Ok(Zeroizing::new(String::from(url)))
    }
}
