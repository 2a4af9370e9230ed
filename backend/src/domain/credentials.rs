//! Password hashing and verification with Argon2id.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$digest`)
//! so verification reads the algorithm, cost and salt back from the stored
//! value. Changing the configured cost only affects newly created hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use super::user::{PasswordHash, UserValidationError};

/// Default Argon2 time cost (iterations).
pub const DEFAULT_TIME_COST: u32 = 2;
/// Default Argon2 memory cost in KiB.
pub const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;

/// Failures raised while hashing or verifying passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// The configured cost parameters are outside Argon2's accepted ranges.
    #[error("invalid password hashing parameters: {message}")]
    InvalidParams { message: String },
    /// Producing a digest failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// A stored digest could not be parsed.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash { message: String },
    /// Verification failed for a reason other than a mismatch.
    #[error("password verification failed: {message}")]
    Verify { message: String },
}

/// Work factor applied to new password hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialSettings {
    /// Argon2 iterations.
    pub time_cost: u32,
    /// Argon2 memory size in KiB.
    pub memory_kib: u32,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_TIME_COST,
            memory_kib: DEFAULT_MEMORY_KIB,
        }
    }
}

/// Salted one-way password hasher.
///
/// # Examples
/// ```
/// use cityinfo::domain::{CredentialService, CredentialSettings};
///
/// let service = CredentialService::new(CredentialSettings { time_cost: 1, memory_kib: 1024 })
///     .unwrap();
/// let hash = service.hash("correct horse").unwrap();
/// assert!(service.verify("correct horse", &hash).unwrap());
/// assert!(!service.verify("battery staple", &hash).unwrap());
/// ```
#[derive(Clone)]
pub struct CredentialService {
    argon2: Argon2<'static>,
}

impl CredentialService {
    /// Build a hasher with the given cost parameters.
    pub fn new(settings: CredentialSettings) -> Result<Self, CredentialError> {
        let params = Params::new(settings.memory_kib, settings.time_cost, 1, None).map_err(
            |err| CredentialError::InvalidParams {
                message: err.to_string(),
            },
        )?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<PasswordHash, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| CredentialError::Hash {
                message: err.to_string(),
            })?
            .to_string();
        PasswordHash::new(encoded).map_err(|err: UserValidationError| CredentialError::Hash {
            message: err.to_string(),
        })
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// Returns `Ok(false)` on a mismatch and an error when the digest cannot be
    /// parsed or verification fails for another reason.
    pub fn verify(&self, password: &str, stored: &PasswordHash) -> Result<bool, CredentialError> {
        let parsed = password_hash::PasswordHash::new(stored.as_str()).map_err(|err| {
            CredentialError::MalformedHash {
                message: err.to_string(),
            }
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialError::Verify {
                message: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn service() -> CredentialService {
        CredentialService::new(CredentialSettings {
            time_cost: 1,
            memory_kib: 1024,
        })
        .expect("test parameters are valid")
    }

    #[rstest]
    fn hash_differs_from_plaintext_and_verifies(service: CredentialService) {
        let hash = service.hash("s3cret").expect("hashing succeeds");
        assert_ne!(hash.as_str(), "s3cret");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(service.verify("s3cret", &hash).expect("verification runs"));
    }

    #[rstest]
    fn same_password_gets_distinct_salts(service: CredentialService) {
        let first = service.hash("repeat").expect("hashing succeeds");
        let second = service.hash("repeat").expect("hashing succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    fn mismatch_is_not_an_error(service: CredentialService) {
        let hash = service.hash("right").expect("hashing succeeds");
        assert!(!service.verify("wrong", &hash).expect("verification runs"));
    }

    #[rstest]
    fn malformed_hash_is_an_error(service: CredentialService) {
        let garbage = PasswordHash::new("not-a-phc-string").expect("non-empty");
        let err = service
            .verify("anything", &garbage)
            .expect_err("malformed digest must fail");
        assert!(matches!(err, CredentialError::MalformedHash { .. }));
    }

    #[rstest]
    fn hashes_made_with_other_costs_still_verify(service: CredentialService) {
        let stronger = CredentialService::new(CredentialSettings {
            time_cost: 2,
            memory_kib: 2048,
        })
        .expect("valid parameters");
        let hash = stronger.hash("portable").expect("hashing succeeds");
        assert!(service.verify("portable", &hash).expect("verification runs"));
    }

    #[test]
    fn zero_time_cost_is_rejected() {
        let result = CredentialService::new(CredentialSettings {
            time_cost: 0,
            memory_kib: 1024,
        });
        assert!(matches!(result, Err(CredentialError::InvalidParams { .. })));
    }
}
