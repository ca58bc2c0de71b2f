use std::{net::SocketAddr, path::PathBuf};

use axum::http::HeaderValue;
use env_helpers::get_env_default;

/// Where key records are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// One row per category in Postgres.
    #[default]
    Postgres,
    /// JSON file with the browser localStorage layout.
    Local,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Local => "local",
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "local" => Ok(StoreBackend::Local),
            _ => Err(format!(
                "Invalid store backend: {}. Must be 'postgres' or 'local'",
                s
            )),
        }
    }
}

/// Where a used key gets copied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMode {
    /// Nothing server-side; the client copies the returned key.
    #[default]
    None,
    /// OSC 52 escape sequence on stderr.
    Osc52,
}

impl std::str::FromStr for ClipboardMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(ClipboardMode::None),
            "osc52" => Ok(ClipboardMode::Osc52),
            _ => Err(format!(
                "Invalid clipboard mode: {}. Must be 'none' or 'osc52'",
                s
            )),
        }
    }
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store_backend: StoreBackend,
    /// Only required with the Postgres backend.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub local_store_path: PathBuf,
    pub cors_origin: HeaderValue,
    pub clipboard: ClipboardMode,
    /// How long a client should show its "copied" indicator.
    pub copied_indicator_ms: u64,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let store_backend: StoreBackend =
            get_env_default("STORE_BACKEND", String::from("postgres"))
                .parse()
                .expect("STORE_BACKEND must be 'postgres' or 'local'");
        let database_url: Option<String> = std::env::var("DATABASE_URL").ok();
        let database_max_connections: u32 = get_env_default("DATABASE_MAX_CONNECTIONS", 5);
        let local_store_path: String =
            get_env_default("LOCAL_STORE_PATH", String::from("shareky-store.json"));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");
        let clipboard: ClipboardMode = get_env_default("CLIPBOARD", String::from("none"))
            .parse()
            .expect("CLIPBOARD must be 'none' or 'osc52'");
        let copied_indicator_ms: u64 = get_env_default("COPIED_INDICATOR_MS", 1500);
        let log_file: String = get_env_default("LOG_FILE", String::from("app.log"));

        Self {
            bind_addr,
            store_backend,
            database_url,
            database_max_connections,
            local_store_path: PathBuf::from(local_store_path),
            cors_origin,
            clipboard,
            copied_indicator_ms,
            log_file: PathBuf::from(log_file),
        }
    }
}
