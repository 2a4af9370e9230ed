//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel row structs and domain
//! types, built on `diesel-async` with `bb8` connection pooling. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module.
//!
//! ```ignore
//! use cityinfo::outbound::persistence::{DbPool, DieselCityRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/world")).await?;
//! let cities = DieselCityRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_city_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_city_repository::DieselCityRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
