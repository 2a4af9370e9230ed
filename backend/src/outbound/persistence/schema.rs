//! Diesel table definitions for the pre-existing schema.
//!
//! The tables were created with unquoted mixed-case identifiers, which
//! PostgreSQL folds to lowercase; `sql_name` maps those folded names onto
//! snake_case Rust columns. Reference DDL lives in `backend/sql/schema.sql`.

diesel::table! {
    /// Registered accounts keyed by username.
    users (username) {
        username -> Varchar,
        /// PHC-encoded password digest.
        #[sql_name = "hashedpass"]
        hashed_pass -> Varchar,
    }
}

diesel::table! {
    /// City records; `id` is generated on insert.
    city (id) {
        id -> Int4,
        name -> Varchar,
        #[sql_name = "countrycode"]
        country_code -> Varchar,
        district -> Varchar,
        population -> Int4,
    }
}
