use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// One row of the `pokeapi` table. Rows are written once by a successful
/// fetch and never updated or deleted by this program.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct StoredRecord {
    pub id: i32,
    pub body: Value,
}
