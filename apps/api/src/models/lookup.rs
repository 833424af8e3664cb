use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One coded option from `common_lookup`, selected as `(id, code AS value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LookupEntry {
    pub id: i64,
    pub value: String,
}

impl LookupEntry {
    pub fn new(id: i64, value: impl Into<String>) -> Self {
        LookupEntry {
            id,
            value: value.into(),
        }
    }
}
