use async_trait::async_trait;

use crate::app_error::AppResult;

/// Destination a key is copied to when it is used.
///
/// Copying is best effort: callers log and ignore failures.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy(&self, text: &str) -> AppResult<()>;
}
