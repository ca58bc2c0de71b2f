use crate::{
    adapters::{
        clipboard::{NoopClipboard, Osc52Clipboard},
        http::app_state::AppState,
        local_store::LocalKeyStore,
    },
    application::ports::clipboard::Clipboard,
    infra::{
        InfraError,
        config::{AppConfig, ClipboardMode, StoreBackend},
        postgres_persistence,
    },
    use_cases::key_usage::{KeyRecordRepo, KeyUsageUseCases},
};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let repo: Arc<dyn KeyRecordRepo> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(InfraError::ConfigMissing {
                    var: "DATABASE_URL",
                })?;
            Arc::new(postgres_persistence(database_url, config.database_max_connections).await?)
        }
        StoreBackend::Local => Arc::new(
            LocalKeyStore::open(&config.local_store_path)
                .await
                .map_err(InfraError::LocalStore)?,
        ),
    };
    info!(backend = config.store_backend.as_str(), "Key store ready");

    let clipboard: Arc<dyn Clipboard> = match config.clipboard {
        ClipboardMode::None => Arc::new(NoopClipboard),
        ClipboardMode::Osc52 => Arc::new(Osc52Clipboard::stderr()),
    };

    let key_usage_use_cases = KeyUsageUseCases::new(repo, clipboard);

    Ok(AppState {
        config: Arc::new(config),
        key_usage_use_cases: Arc::new(key_usage_use_cases),
    })
}

pub fn init_tracing(log_file: &Path) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shareky=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create(log_file).map_err(InfraError::LogFile)?;
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
