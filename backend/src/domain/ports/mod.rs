//! Domain ports defining the edges of the hexagon.
//!
//! Outbound adapters (the diesel repositories, in-memory doubles in tests)
//! implement these traits. Each trait exposes a strongly typed error so
//! inbound adapters can map storage failures onto HTTP responses without
//! knowing which backend raised them.

mod macros;
pub(crate) use macros::define_port_error;

mod city_repository;
mod user_repository;

pub use city_repository::{CityPersistenceError, CityRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
