//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain types.

use diesel::prelude::*;

use super::schema::{city, users};

/// Row read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub username: String,
    pub hashed_pass: String,
}

/// Insertable `users` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub hashed_pass: &'a str,
}

/// Row read from the `city` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = city)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CityRow {
    pub id: i32,
    pub name: String,
    pub country_code: String,
    pub district: String,
    pub population: i32,
}

/// Insertable `city` row; the id comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = city)]
pub(crate) struct NewCityRow<'a> {
    pub name: &'a str,
    pub country_code: &'a str,
    pub district: &'a str,
    pub population: i32,
}
