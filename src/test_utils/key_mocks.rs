//! In-memory doubles for the key usage ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    app_error::{AppError, AppResult},
    application::{ports::clipboard::Clipboard, use_cases::key_usage::KeyRecordRepo},
    domain::entities::{key_category::KeyCategory, key_record::KeyRecord},
};

/// In-memory implementation of `KeyRecordRepo` for testing.
///
/// Each operation runs under a single lock, matching the per-category
/// atomicity of the real backends.
#[derive(Default)]
pub struct InMemoryKeyRecordRepo {
    pub records: Mutex<HashMap<KeyCategory, KeyRecord>>,
    next_id: Mutex<i32>,
}

impl InMemoryKeyRecordRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial records.
    pub fn with_records(records: Vec<KeyRecord>) -> Self {
        let next_id = records.iter().filter_map(|r| r.id).max().unwrap_or(0);
        let map = records
            .into_iter()
            .map(|r| (r.category.clone(), r))
            .collect();
        Self {
            records: Mutex::new(map),
            next_id: Mutex::new(next_id),
        }
    }

    /// Get a record by category name (for test assertions).
    pub fn get_record(&self, category: &str) -> Option<KeyRecord> {
        let category = KeyCategory::new(category)?;
        self.records.lock().unwrap().get(&category).cloned()
    }
}

#[async_trait]
impl KeyRecordRepo for InMemoryKeyRecordRepo {
    async fn get(&self, category: &KeyCategory) -> AppResult<Option<KeyRecord>> {
        Ok(self.records.lock().unwrap().get(category).cloned())
    }

    async fn put(&self, category: &KeyCategory, key_value: &str) -> AppResult<KeyRecord> {
        let mut records = self.records.lock().unwrap();
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let now = chrono::Utc::now().naive_utc();
        let record = KeyRecord {
            id: Some(*next_id),
            created_at: Some(now),
            updated_at: Some(now),
            ..KeyRecord::fresh(category.clone(), key_value.to_string())
        };
        records.insert(category.clone(), record.clone());
        Ok(record)
    }

    async fn decrement(&self, category: &KeyCategory) -> AppResult<KeyRecord> {
        let mut records = self.records.lock().unwrap();
        let record = records.get_mut(category).ok_or(AppError::NotFound)?;
        if record.is_exhausted() {
            return Err(AppError::KeyExhausted);
        }
        record.uses_remaining -= 1;
        record.updated_at = Some(chrono::Utc::now().naive_utc());
        Ok(record.clone())
    }

    async fn remove(&self, category: &KeyCategory) -> AppResult<()> {
        self.records.lock().unwrap().remove(category);
        Ok(())
    }
}

/// Repo whose every call fails as if the backing store were down.
#[derive(Default)]
pub struct UnavailableKeyRecordRepo;

#[async_trait]
impl KeyRecordRepo for UnavailableKeyRecordRepo {
    async fn get(&self, _category: &KeyCategory) -> AppResult<Option<KeyRecord>> {
        Err(AppError::StorageUnavailable("test store offline".into()))
    }

    async fn put(&self, _category: &KeyCategory, _key_value: &str) -> AppResult<KeyRecord> {
        Err(AppError::StorageUnavailable("test store offline".into()))
    }

    async fn decrement(&self, _category: &KeyCategory) -> AppResult<KeyRecord> {
        Err(AppError::StorageUnavailable("test store offline".into()))
    }

    async fn remove(&self, _category: &KeyCategory) -> AppResult<()> {
        Err(AppError::StorageUnavailable("test store offline".into()))
    }
}

/// Clipboard that records every copied value.
#[derive(Default)]
pub struct RecordingClipboard {
    copied: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn copy(&self, text: &str) -> AppResult<()> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Clipboard that always fails.
pub struct FailingClipboard;

#[async_trait]
impl Clipboard for FailingClipboard {
    async fn copy(&self, _text: &str) -> AppResult<()> {
        Err(AppError::Internal("clipboard unavailable".into()))
    }
}
