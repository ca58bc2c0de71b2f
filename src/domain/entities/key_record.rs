use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::key_category::KeyCategory;

/// Number of uses a freshly saved key gets.
pub const MAX_USES: i32 = 3;

/// Stored key for one category.
///
/// `id` and the timestamps are only populated by the database backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    pub id: Option<i32>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub category: KeyCategory,
    pub key_value: String,
    pub uses_remaining: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl KeyRecord {
    /// A record as it looks right after a save, without storage metadata.
    pub fn fresh(category: KeyCategory, key_value: String) -> Self {
        Self {
            id: None,
            category,
            key_value,
            uses_remaining: MAX_USES,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_uses_remaining(self, uses_remaining: i32) -> Self {
        Self {
            uses_remaining,
            ..self
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.uses_remaining <= 0
    }
}
