//! File-backed key store with the browser `localStorage` layout.
//!
//! Each category owns two plain-string entries:
//!
//! ```text
//! shareky_{type}_key   -> key value
//! shareky_{type}_uses  -> remaining uses, decimal
//! ```
//!
//! The whole map is rewritten on every mutation (temp file, then rename).
//! Read-modify-write runs under one async mutex, so operations are atomic
//! within the process.

use std::{collections::BTreeMap, ffi::OsString, io, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{
        key_category::KeyCategory,
        key_record::{KeyRecord, MAX_USES},
    },
    use_cases::key_usage::KeyRecordRepo,
};

type Entries = BTreeMap<String, String>;

pub struct LocalKeyStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl LocalKeyStore {
    /// Loads the store from `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Entries::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    async fn persist(&self, entries: &Entries) -> AppResult<()> {
        let json =
            serde_json::to_vec_pretty(entries).map_err(|e| AppError::Internal(e.to_string()))?;

        let mut tmp: OsString = self.path.clone().into_os_string();
        tmp.push(".tmp");

        tokio::fs::write(&tmp, json).await.map_err(unavailable)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

fn key_entry(category: &KeyCategory) -> String {
    format!("shareky_{category}_key")
}

fn uses_entry(category: &KeyCategory) -> String {
    format!("shareky_{category}_uses")
}

fn unavailable(err: io::Error) -> AppError {
    warn!(error = %err, "Local key store write failed");
    AppError::StorageUnavailable("Local key store is not writable".into())
}

/// A record exists only when both entries are present and the count parses.
fn read_record(entries: &Entries, category: &KeyCategory) -> Option<KeyRecord> {
    let key_value = entries.get(&key_entry(category))?;
    let raw_uses = entries.get(&uses_entry(category))?;

    match raw_uses.trim().parse::<i32>() {
        Ok(uses) => Some(
            KeyRecord::fresh(category.clone(), key_value.clone())
                .with_uses_remaining(uses.clamp(0, MAX_USES)),
        ),
        Err(err) => {
            warn!(%category, raw_uses = %raw_uses, error = %err, "Ignoring unparseable use count");
            None
        }
    }
}

#[async_trait]
impl KeyRecordRepo for LocalKeyStore {
    async fn get(&self, category: &KeyCategory) -> AppResult<Option<KeyRecord>> {
        let entries = self.entries.lock().await;
        Ok(read_record(&entries, category))
    }

    async fn put(&self, category: &KeyCategory, key_value: &str) -> AppResult<KeyRecord> {
        let mut entries = self.entries.lock().await;

        let mut next = entries.clone();
        next.insert(key_entry(category), key_value.to_string());
        next.insert(uses_entry(category), MAX_USES.to_string());
        self.persist(&next).await?;
        *entries = next;

        Ok(KeyRecord::fresh(category.clone(), key_value.to_string()))
    }

    async fn decrement(&self, category: &KeyCategory) -> AppResult<KeyRecord> {
        let mut entries = self.entries.lock().await;

        let record = read_record(&entries, category).ok_or(AppError::NotFound)?;
        if record.is_exhausted() {
            return Err(AppError::KeyExhausted);
        }
        let record = KeyRecord {
            uses_remaining: record.uses_remaining - 1,
            ..record
        };

        let mut next = entries.clone();
        next.insert(uses_entry(category), record.uses_remaining.to_string());
        self.persist(&next).await?;
        *entries = next;

        Ok(record)
    }

    async fn remove(&self, category: &KeyCategory) -> AppResult<()> {
        let mut entries = self.entries.lock().await;

        let mut next = entries.clone();
        let removed_key = next.remove(&key_entry(category)).is_some();
        let removed_uses = next.remove(&uses_entry(category)).is_some();
        if !removed_key && !removed_uses {
            return Ok(());
        }
        self.persist(&next).await?;
        *entries = next;

        Ok(())
    }
}
