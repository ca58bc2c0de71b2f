use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::{
        key_category::KeyCategory,
        key_record::{KeyRecord, MAX_USES},
    },
    use_cases::key_usage::KeyRecordRepo,
};

const RECORD_COLUMNS: &str = "id, type, key_value, uses_remaining, created_at, updated_at";

#[async_trait]
impl KeyRecordRepo for PostgresPersistence {
    async fn get(&self, category: &KeyCategory) -> AppResult<Option<KeyRecord>> {
        let rec = sqlx::query_as::<_, KeyRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM keys WHERE type = $1 LIMIT 1"
        ))
        .bind(category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn put(&self, category: &KeyCategory, key_value: &str) -> AppResult<KeyRecord> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM keys WHERE type = $1")
            .bind(category)
            .execute(&mut *tx)
            .await?;

        // A concurrent save can land between the delete and the insert.
        let rec = sqlx::query_as::<_, KeyRecord>(&format!(
            r#"INSERT INTO keys (type, key_value, uses_remaining)
               VALUES ($1, $2, $3)
               ON CONFLICT (type)
               DO UPDATE SET key_value = EXCLUDED.key_value,
                             uses_remaining = EXCLUDED.uses_remaining,
                             created_at = EXCLUDED.created_at,
                             updated_at = EXCLUDED.updated_at
               RETURNING {RECORD_COLUMNS}"#
        ))
        .bind(category)
        .bind(key_value)
        .bind(MAX_USES)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(rec)
    }

    async fn decrement(&self, category: &KeyCategory) -> AppResult<KeyRecord> {
        // Single statement so concurrent uses cannot lose an update.
        let rec = sqlx::query_as::<_, KeyRecord>(&format!(
            r#"UPDATE keys
               SET uses_remaining = uses_remaining - 1,
                   updated_at = NOW()
               WHERE type = $1 AND uses_remaining > 0
               RETURNING {RECORD_COLUMNS}"#
        ))
        .bind(category)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(rec) = rec {
            return Ok(rec);
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM keys WHERE type = $1)")
                .bind(category)
                .fetch_one(&self.pool)
                .await?;

        if exists {
            Err(AppError::KeyExhausted)
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn remove(&self, category: &KeyCategory) -> AppResult<()> {
        sqlx::query("DELETE FROM keys WHERE type = $1")
            .bind(category)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
