//! Domain primitives, use-cases and ports.
//!
//! Purpose: keep the request/response contract of the service independent of
//! actix-web and diesel. Inbound adapters translate HTTP payloads into these
//! types; outbound adapters implement the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request correlation id held in task-local storage.
//! - Username / PasswordHash / User: registered accounts.
//! - Credentials: validated signup and login input.
//! - City / NewCity / CityPopulation: city records.
//! - CredentialService: Argon2id hashing and verification.
//! - AccountService / CityService: use-cases called by HTTP handlers.

pub mod accounts;
pub mod auth;
pub mod cities;
pub mod city;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::accounts::{AccountService, LOGIN_REJECTED_MESSAGE};
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::cities::CityService;
pub use self::city::{City, CityId, CityPopulation, NewCity};
pub use self::credentials::{
    CredentialError, CredentialService, CredentialSettings, DEFAULT_MEMORY_KIB, DEFAULT_TIME_COST,
};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;
pub use self::user::{PasswordHash, User, UserValidationError, Username};
