//! Port abstraction for city persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{City, CityId, NewCity};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by city repository adapters.
    pub enum CityPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "city repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "city repository query failed: {message}",
    }
}

#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Look a city up by its exact name. A missing row is `Ok(None)`.
    async fn find_by_name(&self, name: &str) -> Result<Option<City>, CityPersistenceError>;

    /// Insert a city and return the generated id.
    async fn insert(&self, city: &NewCity) -> Result<CityId, CityPersistenceError>;

    /// Set the population of the city with the given id and return the number
    /// of rows touched (zero when the id is unknown).
    async fn update_population(
        &self,
        id: CityId,
        population: i32,
    ) -> Result<u64, CityPersistenceError>;
}
