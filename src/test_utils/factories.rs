//! Test data factories.
//!
//! Factories build a complete record with sensible defaults; the closure
//! overrides specific fields.

use chrono::NaiveDateTime;

use crate::domain::entities::{
    key_category::KeyCategory,
    key_record::{KeyRecord, MAX_USES},
};

/// Create a stored key record for `category` with sensible defaults.
pub fn create_test_key_record(
    category: &str,
    overrides: impl FnOnce(&mut KeyRecord),
) -> KeyRecord {
    let mut record = KeyRecord {
        id: Some(1),
        category: KeyCategory::new(category).expect("test category must not be blank"),
        key_value: "TEST-KEY-123".to_string(),
        uses_remaining: MAX_USES,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut record);
    record
}

/// Fixed timestamp so assertions stay deterministic.
pub fn test_datetime() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-01-15 12:00:00", "%Y-%m-%d %H:%M:%S")
        .expect("valid test datetime")
}
