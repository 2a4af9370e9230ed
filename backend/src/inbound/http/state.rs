//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend on domain
//! use-cases only and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{CityRepository, UserRepository};
use crate::domain::{AccountService, CityService, CredentialService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub cities: CityService,
}

impl HttpState {
    /// Wire the use-cases over the given repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        cities: Arc<dyn CityRepository>,
        credentials: CredentialService,
    ) -> Self {
        Self {
            accounts: AccountService::new(users, credentials),
            cities: CityService::new(cities),
        }
    }
}
