use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::{key_category::KeyCategory, key_record::KeyRecord, usage_state::UsageState},
    use_cases::key_usage::KeyStatus,
};

#[derive(Deserialize)]
struct TypeQuery {
    #[serde(rename = "type")]
    category: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavePayload {
    #[serde(rename = "type")]
    category: Option<String>,
    key_value: Option<String>,
}

#[derive(Deserialize)]
struct UsePayload {
    #[serde(rename = "type")]
    category: Option<String>,
}

#[derive(Serialize)]
struct KeyResponse {
    key: Option<KeyRecord>,
    state: UsageState,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UseResponse {
    key: KeyRecord,
    state: UsageState,
    copied_indicator_ms: u64,
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
}

#[derive(Serialize)]
struct ItemsResponse<T> {
    items: Vec<T>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/keys",
            get(get_key).post(save_key).patch(use_key).delete(reset_key),
        )
        .route("/keys/overview", get(overview))
}

async fn get_key(
    State(app_state): State<AppState>,
    Query(query): Query<TypeQuery>,
) -> AppResult<impl IntoResponse> {
    let category = parse_category(query.category.as_deref())?;
    let status = app_state.key_usage_use_cases.status(&category).await?;
    Ok(Json(KeyResponse {
        key: status.key,
        state: status.state,
    }))
}

async fn save_key(
    State(app_state): State<AppState>,
    payload: Result<Json<SavePayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let category = parse_category(payload.category.as_deref())?;
    let key_value = payload
        .key_value
        .ok_or(AppError::MissingParameter("keyValue"))?;

    let status = app_state
        .key_usage_use_cases
        .save(&category, &key_value)
        .await?;

    Ok(Json(KeyResponse {
        key: status.key,
        state: status.state,
    }))
}

async fn use_key(
    State(app_state): State<AppState>,
    payload: Result<Json<UsePayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let category = parse_category(payload.category.as_deref())?;
    let outcome = app_state.key_usage_use_cases.use_key(&category).await?;
    Ok(Json(UseResponse {
        key: outcome.key,
        state: outcome.state,
        copied_indicator_ms: app_state.config.copied_indicator_ms,
    }))
}

async fn reset_key(
    State(app_state): State<AppState>,
    Query(query): Query<TypeQuery>,
) -> AppResult<impl IntoResponse> {
    let category = parse_category(query.category.as_deref())?;
    app_state.key_usage_use_cases.reset(&category).await?;
    Ok(Json(DeleteResponse { success: true }))
}

async fn overview(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items: Vec<KeyStatus> = app_state.key_usage_use_cases.overview().await?;
    Ok(Json(ItemsResponse { items }))
}

fn parse_category(raw: Option<&str>) -> AppResult<KeyCategory> {
    raw.and_then(KeyCategory::new)
        .ok_or(AppError::MissingParameter("type"))
}
