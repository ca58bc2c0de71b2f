use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::clipboard::Clipboard,
    domain::entities::{key_category::KeyCategory, key_record::KeyRecord, usage_state::UsageState},
};

/// Persistence contract for key records, one per category.
///
/// Every operation is atomic per category.
#[async_trait]
pub trait KeyRecordRepo: Send + Sync {
    /// Absence is `Ok(None)`, never an error.
    async fn get(&self, category: &KeyCategory) -> AppResult<Option<KeyRecord>>;

    /// Replaces any existing record with a fresh one at full uses.
    async fn put(&self, category: &KeyCategory, key_value: &str) -> AppResult<KeyRecord>;

    /// `NotFound` when absent, `KeyExhausted` when already at zero.
    async fn decrement(&self, category: &KeyCategory) -> AppResult<KeyRecord>;

    /// No-op when absent.
    async fn remove(&self, category: &KeyCategory) -> AppResult<()>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatus {
    #[serde(rename = "type")]
    pub category: KeyCategory,
    pub state: UsageState,
    pub key: Option<KeyRecord>,
}

impl KeyStatus {
    fn of(category: &KeyCategory, key: Option<KeyRecord>) -> Self {
        Self {
            category: category.clone(),
            state: UsageState::of(key.as_ref()),
            key,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UseOutcome {
    pub key: KeyRecord,
    pub state: UsageState,
}

#[derive(Clone)]
pub struct KeyUsageUseCases {
    repo: Arc<dyn KeyRecordRepo>,
    clipboard: Arc<dyn Clipboard>,
}

impl KeyUsageUseCases {
    pub fn new(repo: Arc<dyn KeyRecordRepo>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self { repo, clipboard }
    }

    pub async fn status(&self, category: &KeyCategory) -> AppResult<KeyStatus> {
        let record = self.repo.get(category).await?;
        Ok(KeyStatus::of(category, record))
    }

    /// Stores a new key at full uses, whatever state the category was in.
    #[instrument(skip(self, key_value))]
    pub async fn save(&self, category: &KeyCategory, key_value: &str) -> AppResult<KeyStatus> {
        let key_value = key_value.trim();
        if key_value.is_empty() {
            return Err(AppError::MissingParameter("keyValue"));
        }

        let record = self.repo.put(category, key_value).await?;
        info!(%category, "Key saved");

        Ok(KeyStatus::of(category, Some(record)))
    }

    /// Copies the key and consumes one use.
    #[instrument(skip(self))]
    pub async fn use_key(&self, category: &KeyCategory) -> AppResult<UseOutcome> {
        let record = self
            .repo
            .get(category)
            .await?
            .ok_or(AppError::NotFound)?;

        if record.is_exhausted() {
            return Err(AppError::KeyExhausted);
        }

        // Charge the use first; the copied value is the one that was charged.
        let key = self.repo.decrement(category).await?;

        if let Err(err) = self.clipboard.copy(&key.key_value).await {
            debug!(error = %err, "Clipboard copy failed, continuing");
        }

        let state = UsageState::of(Some(&key));
        info!(%category, uses_remaining = key.uses_remaining, "Key used");

        Ok(UseOutcome { key, state })
    }

    #[instrument(skip(self))]
    pub async fn reset(&self, category: &KeyCategory) -> AppResult<()> {
        self.repo.remove(category).await?;
        info!(%category, "Key reset");
        Ok(())
    }

    /// Status of every known category, in display order.
    pub async fn overview(&self) -> AppResult<Vec<KeyStatus>> {
        let mut items = Vec::with_capacity(KeyCategory::KNOWN.len());
        for category in KeyCategory::known() {
            items.push(self.status(&category).await?);
        }
        Ok(items)
    }
}
