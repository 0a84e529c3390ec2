//! SQL DDL for initializing the record store.

/// Postgres schema:
/// - `id` INTEGER PRIMARY KEY, the identifier extracted from each payload
/// - `body` JSONB, the full fetched document stored verbatim
///
/// `IF NOT EXISTS` keeps this safe to run against a database where the
/// table already exists; there is no migration logic beyond it.
pub const PG_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS pokeapi (
    id INTEGER PRIMARY KEY,
    body JSONB
);
"#;
