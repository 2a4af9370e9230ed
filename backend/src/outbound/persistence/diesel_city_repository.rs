//! PostgreSQL-backed `CityRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CityPersistenceError, CityRepository};
use crate::domain::{City, CityId, NewCity};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CityRow, NewCityRow};
use super::pool::{DbPool, PoolError};
use super::schema::city;

/// Diesel-backed implementation of the [`CityRepository`] port.
#[derive(Clone)]
pub struct DieselCityRepository {
    pool: DbPool,
}

impl DieselCityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CityPersistenceError {
    map_basic_pool_error(error, CityPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CityPersistenceError {
    map_basic_diesel_error(
        error,
        CityPersistenceError::query,
        CityPersistenceError::connection,
    )
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            country_code: row.country_code,
            district: row.district,
            population: row.population,
        }
    }
}

#[async_trait]
impl CityRepository for DieselCityRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<City>, CityPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = city::table
            .filter(city::name.eq(name))
            .select(CityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(City::from))
    }

    async fn insert(&self, new_city: &NewCity) -> Result<CityId, CityPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCityRow {
            name: &new_city.name,
            country_code: &new_city.country_code,
            district: &new_city.district,
            population: new_city.population,
        };
        diesel::insert_into(city::table)
            .values(&row)
            .returning(city::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update_population(
        &self,
        id: CityId,
        population: i32,
    ) -> Result<u64, CityPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(city::table.filter(city::id.eq(id)))
            .set(city::population.eq(population))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(affected).unwrap_or(u64::MAX))
    }
}
