//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth_gate;
pub mod cities;
pub mod error;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
