//! Handlers for the prompt REST API

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::storage::{HistoryFolder, PromptDocument, PromptSummary, SaveReceipt, SnapshotDocument};

/// Body of `PUT /api/prompts/:filename`
///
/// `content` is optional at the serde level so that an absent or null field
/// reaches the store as "missing" rather than failing deserialization.
#[derive(Debug, Deserialize)]
pub struct SavePromptRequest {
    #[serde(default)]
    pub content: Option<String>,
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Prompt store API is running",
    }))
}

pub async fn list_prompts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PromptSummary>>> {
    Ok(Json(state.store.list_prompts().await?))
}

pub async fn read_prompt(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<Json<PromptDocument>> {
    Ok(Json(state.store.read_prompt(&filename).await?))
}

pub async fn save_prompt(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    payload: Result<Json<SavePromptRequest>, JsonRejection>,
) -> ApiResult<Json<SaveReceipt>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected save body for {}: {}", filename, rejection);
            return Err(ApiError::bad_request(format!(
                "Content is required: {}",
                rejection.body_text()
            )));
        }
    };

    let receipt = state
        .store
        .write_prompt(&filename, request.content.as_deref())
        .await?;
    Ok(Json(receipt))
}

pub async fn history_tree(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HistoryFolder>>> {
    Ok(Json(state.store.list_history_tree().await?))
}

pub async fn read_history_entry(
    State(state): State<Arc<AppState>>,
    Path((folder, filename)): Path<(String, String)>,
) -> ApiResult<Json<SnapshotDocument>> {
    let doc = state.store.read_history_entry(&folder, &filename).await?;
    Ok(Json(doc))
}

pub async fn restore_history_entry(
    State(state): State<Arc<AppState>>,
    Path((folder, filename)): Path<(String, String)>,
) -> ApiResult<Json<SaveReceipt>> {
    let receipt = state.store.restore_history_entry(&folder, &filename).await?;
    Ok(Json(receipt))
}
