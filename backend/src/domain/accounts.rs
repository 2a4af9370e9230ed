//! Account signup and login use-cases.
//!
//! Hashing and verification are CPU-bound, so both run on the blocking thread
//! pool rather than on the actix worker that received the request.

use std::sync::Arc;

use tokio::task;
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    CredentialError, CredentialService, Credentials, Error, PasswordHash, User, Username,
};

/// Message returned when a login attempt fails for any credential reason.
pub const LOGIN_REJECTED_MESSAGE: &str = "invalid username or password";

/// Signup and login over a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    credentials: CredentialService,
}

impl AccountService {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<dyn UserRepository>, credentials: CredentialService) -> Self {
        Self { users, credentials }
    }

    /// Register a new user.
    ///
    /// The username is claimed by a single insert; a duplicate surfaces as
    /// [`crate::domain::ErrorCode::Conflict`].
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<(), Error> {
        let password_hash = self.hash(credentials.password()).await?;
        let user = User::new(credentials.username().clone(), password_hash);
        self.users.insert(&user).await.map_err(map_user_error)?;
        debug!(username = %credentials.username(), "user registered");
        Ok(())
    }

    /// Check credentials and return the authenticated username.
    ///
    /// An unknown user and a wrong password are indistinguishable to the
    /// caller; both yield [`crate::domain::ErrorCode::Forbidden`].
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Username, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            debug!(username = %credentials.username(), "login for unknown user");
            return Err(Error::forbidden(LOGIN_REJECTED_MESSAGE));
        };

        let matches = self
            .verify(credentials.password(), user.password_hash())
            .await?;
        if matches {
            Ok(user.username().clone())
        } else {
            debug!(username = %credentials.username(), "login with wrong password");
            Err(Error::forbidden(LOGIN_REJECTED_MESSAGE))
        }
    }

    async fn hash(&self, password: &str) -> Result<PasswordHash, Error> {
        let service = self.credentials.clone();
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || service.hash(password.as_str()))
            .await
            .map_err(map_join_error)?
            .map_err(map_credential_error)
    }

    async fn verify(&self, password: &str, stored: &PasswordHash) -> Result<bool, Error> {
        let service = self.credentials.clone();
        let password = Zeroizing::new(password.to_owned());
        let stored = stored.clone();
        task::spawn_blocking(move || service.verify(password.as_str(), &stored))
            .await
            .map_err(map_join_error)?
            .map_err(map_credential_error)
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Conflict { username } => {
            Error::conflict(format!("user already exists: {username}"))
        }
    }
}

fn map_credential_error(error: CredentialError) -> Error {
    error!(%error, "credential service failure");
    Error::internal(error.to_string())
}

fn map_join_error(error: task::JoinError) -> Error {
    Error::internal(format!("password hashing task failed: {error}"))
}
