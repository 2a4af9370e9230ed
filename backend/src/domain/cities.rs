//! City lookup and mutation use-cases.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{CityPersistenceError, CityRepository};
use crate::domain::{City, CityPopulation, Error, NewCity};

/// City operations over a [`CityRepository`].
#[derive(Clone)]
pub struct CityService {
    cities: Arc<dyn CityRepository>,
}

impl CityService {
    pub fn new(cities: Arc<dyn CityRepository>) -> Self {
        Self { cities }
    }

    /// Fetch a city by exact name.
    ///
    /// A missing row is not an error: it is logged and answered with the
    /// zero-valued [`City`].
    pub async fn find_by_name(&self, name: &str) -> Result<City, Error> {
        match self.cities.find_by_name(name).await.map_err(map_city_error)? {
            Some(city) => Ok(city),
            None => {
                info!(city = name, "city not found");
                Ok(City::default())
            }
        }
    }

    /// Store a new city and return the stored record.
    pub async fn create(&self, city: NewCity) -> Result<City, Error> {
        let id = self.cities.insert(&city).await.map_err(map_city_error)?;
        Ok(city.with_id(id))
    }

    /// Overwrite the population of a city. Unknown ids are a no-op.
    pub async fn update_population(&self, update: CityPopulation) -> Result<(), Error> {
        let affected = self
            .cities
            .update_population(update.id, update.population)
            .await
            .map_err(map_city_error)?;
        if affected == 0 {
            info!(city_id = update.id, "population update matched no city");
        }
        Ok(())
    }
}

fn map_city_error(error: CityPersistenceError) -> Error {
    match error {
        CityPersistenceError::Connection { message } => {
            Error::internal(format!("city repository unavailable: {message}"))
        }
        CityPersistenceError::Query { message } => {
            Error::internal(format!("city repository error: {message}"))
        }
    }
}
