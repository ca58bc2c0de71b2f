//! Test app state builder for HTTP-level testing.
//!
//! Creates an `AppState` over in-memory mocks so route handlers can be
//! exercised with `axum_test::TestServer`.

use std::{path::PathBuf, sync::Arc};

use axum::http::HeaderValue;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        ports::clipboard::Clipboard,
        use_cases::key_usage::{KeyRecordRepo, KeyUsageUseCases},
    },
    domain::entities::key_record::KeyRecord,
    infra::config::{AppConfig, ClipboardMode, StoreBackend},
    test_utils::{InMemoryKeyRecordRepo, RecordingClipboard},
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo, clipboard) = TestAppStateBuilder::new()
///     .with_record(create_test_key_record("daily", |r| r.uses_remaining = 1))
///     .build_with_mocks();
/// ```
pub struct TestAppStateBuilder {
    records: Vec<KeyRecord>,
    repo: Option<Arc<dyn KeyRecordRepo>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    copied_indicator_ms: u64,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            records: vec![],
            repo: None,
            clipboard: None,
            copied_indicator_ms: 1500,
        }
    }

    /// Seed the in-memory repo with a record.
    pub fn with_record(mut self, record: KeyRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Replace the in-memory repo entirely (seeded records are ignored).
    pub fn with_repo(mut self, repo: Arc<dyn KeyRecordRepo>) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn with_copied_indicator_ms(mut self, ms: u64) -> Self {
        self.copied_indicator_ms = ms;
        self
    }

    /// Build with the default in-memory repo and a recording clipboard.
    /// Returns the mocks alongside the state for test assertions.
    pub fn build_with_mocks(
        self,
    ) -> (
        AppState,
        Arc<InMemoryKeyRecordRepo>,
        Arc<RecordingClipboard>,
    ) {
        let repo = Arc::new(InMemoryKeyRecordRepo::with_records(self.records.clone()));
        let clipboard = Arc::new(RecordingClipboard::new());

        let app_state = self
            .with_repo(repo.clone())
            .with_clipboard(clipboard.clone())
            .build();

        (app_state, repo, clipboard)
    }

    pub fn build(self) -> AppState {
        let repo: Arc<dyn KeyRecordRepo> = self
            .repo
            .unwrap_or_else(|| Arc::new(InMemoryKeyRecordRepo::with_records(self.records)));
        let clipboard: Arc<dyn Clipboard> = self
            .clipboard
            .unwrap_or_else(|| Arc::new(RecordingClipboard::new()));

        let config = Arc::new(AppConfig {
            bind_addr: "127.0.0.1:3001".parse().unwrap(),
            store_backend: StoreBackend::Local,
            database_url: None,
            database_max_connections: 1,
            local_store_path: PathBuf::from("unused.json"),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            clipboard: ClipboardMode::None,
            copied_indicator_ms: self.copied_indicator_ms,
            log_file: PathBuf::from("unused.log"),
        });

        AppState {
            config,
            key_usage_use_cases: Arc::new(KeyUsageUseCases::new(repo, clipboard)),
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
