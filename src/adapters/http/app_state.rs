use std::sync::Arc;

use axum::extract::FromRef;

use crate::{infra::config::AppConfig, use_cases::key_usage::KeyUsageUseCases};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub key_usage_use_cases: Arc<KeyUsageUseCases>,
}

impl FromRef<AppState> for Arc<KeyUsageUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.key_usage_use_cases.clone()
    }
}
