//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};

use crate::domain::CredentialService;
use crate::domain::ports::{CityRepository, UserRepository};
use crate::settings::SessionSettings;

/// Everything `create_server` needs: session cookie policy, bind address and
/// the repositories backing the handlers.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) cities: Arc<dyn CityRepository>,
    pub(crate) credentials: CredentialService,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        users: Arc<dyn UserRepository>,
        cities: Arc<dyn CityRepository>,
        credentials: CredentialService,
    ) -> Self {
        Self {
            key: session.key,
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
            bind_addr,
            users,
            cities,
            credentials,
        }
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
