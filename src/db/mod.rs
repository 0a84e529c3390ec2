//! Database module: models and schema for the harvested-record store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (Postgres)
//! - `postgres.rs`: pool-backed storage operations

pub mod models;
pub mod postgres;
pub mod schema;

pub use models::StoredRecord;
pub use postgres::{PgPool, RecordStorage, StoreOutcome};
pub use schema::PG_INIT;
