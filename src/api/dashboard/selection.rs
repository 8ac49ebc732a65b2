//! Selection endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ListResponse, ModelView, SelectionResponse};
use crate::domain::ModelRecord;

fn selected_views(records: Vec<ModelRecord>) -> ListResponse<ModelView> {
    let now = Utc::now();
    ListResponse::new(
        records
            .into_iter()
            .map(|record| ModelView::new(record, true, now))
            .collect(),
    )
}

/// POST /api/models/{model_id}/select
pub async fn toggle_selection(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let selected = state
        .model_service
        .toggle_selection(&model_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(SelectionResponse {
        id: model_id,
        selected,
    }))
}

/// GET /api/selection
pub async fn list_selection(State(state): State<AppState>) -> Json<ListResponse<ModelView>> {
    Json(selected_views(state.model_service.selected().await))
}

/// POST /api/selection/all
pub async fn select_all(State(state): State<AppState>) -> Json<ListResponse<ModelView>> {
    let records = state.model_service.select_all().await;
    debug!(count = records.len(), "Selected all models");

    Json(selected_views(records))
}

/// DELETE /api/selection
pub async fn clear_selection(State(state): State<AppState>) -> StatusCode {
    state.model_service.clear_selection().await;
    StatusCode::NO_CONTENT
}
