//! City records served by the `/cities` and `/city` endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storage-generated primary key of a city row.
pub type CityId = i32;

/// City as stored in the `city` table.
///
/// `Default` yields the zero-valued record returned when a lookup finds no
/// row.
///
/// # Examples
/// ```
/// use cityinfo::domain::City;
///
/// let empty = City::default();
/// assert_eq!(empty.id, 0);
/// assert!(empty.name.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[schema(example = 1532)]
    pub id: CityId,
    #[schema(example = "Tokyo")]
    pub name: String,
    #[schema(example = "JPN")]
    pub country_code: String,
    #[schema(example = "Tokyo-to")]
    pub district: String,
    #[schema(example = 7_980_230)]
    pub population: i32,
}

/// Payload for inserting a city; the id is assigned by storage.
///
/// An `id` field in the request body is accepted and ignored. Missing fields
/// take their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NewCity {
    #[schema(example = "Sapporo")]
    pub name: String,
    #[schema(example = "JPN")]
    pub country_code: String,
    #[schema(example = "Hokkaido")]
    pub district: String,
    #[schema(example = 1_790_886)]
    pub population: i32,
}

impl NewCity {
    /// Materialise the stored record once storage has assigned an id.
    pub fn with_id(self, id: CityId) -> City {
        City {
            id,
            name: self.name,
            country_code: self.country_code,
            district: self.district,
            population: self.population,
        }
    }
}

/// Population update keyed by city id. Missing fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CityPopulation {
    #[schema(example = 1532)]
    pub id: CityId,
    #[schema(example = 8_000_000)]
    pub population: i32,
}
