//! Cookie session settings.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

use super::{BuildMode, ConfigError, non_empty, parse_bool_env};

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
pub(crate) const SESSION_KEY_MIN_LEN: usize = 64;
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";

/// Settings consumed by the session middleware.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy of the session cookie.
    pub same_site: SameSite,
}

impl SessionSettings {
    pub(super) fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let cookie_secure = parse_bool_env(env, COOKIE_SECURE_ENV, true)?;
        if !cookie_secure {
            warn!("SESSION_COOKIE_SECURE disabled; session cookies travel over plain HTTP");
        }
        let key = session_key_from_env(env, mode)?;
        Ok(Self {
            key,
            cookie_secure,
            same_site: SameSite::Lax,
        })
    }
}

/// Read the key file. Debug builds fall back to a random key when the file is
/// missing or short; release builds fail.
fn session_key_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Key, ConfigError> {
    let path = PathBuf::from(
        non_empty(env, KEY_FILE_ENV).unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                if !mode.is_debug() {
                    return Err(ConfigError::KeyTooShort {
                        path,
                        length,
                        min_len: SESSION_KEY_MIN_LEN,
                    });
                }
                warn!(
                    path = %path.display(),
                    length,
                    "session key too short; using temporary session key"
                );
                return Ok(Key::generate());
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key; sessions will not survive a restart"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(ConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}
