//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use std::sync::Arc;

use crate::domain::{CredentialService, CredentialSettings, Credentials};
use crate::inbound::http::state::HttpState;
use crate::test_support::{InMemoryCityRepository, InMemoryUserRepository};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Uses the production cookie name `session` but disables the `Secure` flag
///   so plain-HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Handler state wired to in-memory repositories.
pub struct TestContext {
    pub state: HttpState,
    pub users: Arc<InMemoryUserRepository>,
    pub cities: Arc<InMemoryCityRepository>,
}

impl TestContext {
    /// Fresh repositories and a cheap password hasher.
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let cities = Arc::new(InMemoryCityRepository::new());
        let credentials = CredentialService::new(CredentialSettings {
            time_cost: 1,
            memory_kib: 1024,
        })
        .expect("test hashing parameters are valid");
        Self {
            state: HttpState::new(users.clone(), cities.clone(), credentials),
            users,
            cities,
        }
    }

    /// Register a user directly through the account service.
    pub async fn seed_user(&self, username: &str, password: &str) {
        let credentials =
            Credentials::try_from_parts(username, password).expect("valid seed credentials");
        self.state
            .accounts
            .sign_up(&credentials)
            .await
            .expect("seed user stored");
    }
}
