//! City info backend: account signup and login with cookie sessions, plus
//! session-gated lookup and mutation of rows in a `city` table.
//!
//! Layout follows a ports-and-adapters split:
//!
//! - [`domain`]: types, use-cases and repository ports
//! - [`inbound`]: HTTP handlers and session gate
//! - [`outbound`]: Diesel/PostgreSQL repositories
//! - [`server`]: application assembly
//! - [`settings`]: environment-driven configuration

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
