use crate::config::DatabaseConfig;
use crate::db::models::StoredRecord;
use crate::db::schema::PG_INIT;
use crate::error::VaultError;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};

pub type PgPool = Pool<Postgres>;

/// Result of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Inserted,
    /// The id was already present; the insert was a silent no-op.
    AlreadyPresent,
}

#[derive(Clone)]
pub struct RecordStorage {
    pool: PgPool,
}

impl RecordStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from plain host/port/dbname/user/password settings.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, VaultError> {
        let opts = PgConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .database(&cfg.dbname)
            .username(&cfg.user)
            .password(&cfg.password);
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections.max(1))
            .connect_with(opts)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), VaultError> {
        // sqlx::query runs one statement at a time, so split the DDL.
        for stmt in PG_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Conditional insert keyed by id. A row that already exists is left
    /// untouched and reported as `AlreadyPresent`, never as an error.
    pub async fn insert_new(&self, id: i32, body: &Value) -> Result<StoreOutcome, VaultError> {
        let result = sqlx::query(
            r#"
            INSERT INTO pokeapi (id, body)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(body)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(StoreOutcome::AlreadyPresent)
        } else {
            Ok(StoreOutcome::Inserted)
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<StoredRecord>, VaultError> {
        let row = sqlx::query_as::<_, StoredRecord>("SELECT id, body FROM pokeapi WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Close the pool. Called on every exit path of a run so an aborted
    /// loop does not leak connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
