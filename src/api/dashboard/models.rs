//! Model registry endpoint handlers

use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, Json, ListResponse, ModelView, ModelsQuery, RegisterModelRequest, StatsResponse,
};
use crate::domain::ModelId;

/// Deletion acknowledgement
#[derive(Debug, Serialize)]
pub struct DeleteModelResponse {
    pub id: String,
    pub object: &'static str,
    pub deleted: bool,
}

async fn selected_ids(state: &AppState) -> HashSet<ModelId> {
    state
        .model_service
        .selected()
        .await
        .into_iter()
        .map(|record| record.id().clone())
        .collect()
}

/// GET /api/models
pub async fn list_models(
    State(state): State<AppState>,
    Query(query): Query<ModelsQuery>,
) -> Result<Json<ListResponse<ModelView>>, ApiError> {
    let field = query.sort.unwrap_or_default();
    let direction = query.direction.unwrap_or_default();
    debug!(?field, ?direction, "Listing models");

    let selected = selected_ids(&state).await;
    let now = Utc::now();

    let views = state
        .model_service
        .list(field, direction)
        .await
        .into_iter()
        .map(|record| {
            let is_selected = selected.contains(record.id());
            ModelView::new(record, is_selected, now)
        })
        .collect();

    Ok(Json(ListResponse::new(views)))
}

/// POST /api/models
///
/// Registers the file and starts its pipeline; the response describes the
/// record as it was at registration time.
pub async fn register_model(
    State(state): State<AppState>,
    Json(request): Json<RegisterModelRequest>,
) -> Result<(StatusCode, Json<ModelView>), ApiError> {
    let job = state
        .benchmark_service
        .submit(&request.name, request.size)
        .await
        .map_err(ApiError::from)?;

    info!(model_id = %job.record.id(), name = %request.name, "Accepted model upload");

    Ok((
        StatusCode::ACCEPTED,
        Json(ModelView::new(job.record, false, Utc::now())),
    ))
}

/// GET /api/models/{model_id}
pub async fn get_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<ModelView>, ApiError> {
    debug!(model_id = %model_id, "Getting model");

    let record = state
        .model_service
        .get_required(&model_id)
        .await
        .map_err(ApiError::from)?;
    let selected = state
        .model_service
        .is_selected(&model_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ModelView::new(record, selected, Utc::now())))
}

/// DELETE /api/models/{model_id}
pub async fn delete_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<DeleteModelResponse>, ApiError> {
    let deleted = state
        .model_service
        .delete(&model_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!("Model '{}' not found", model_id)));
    }

    Ok(Json(DeleteModelResponse {
        id: model_id,
        object: "model",
        deleted,
    }))
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.model_service.stats().await.into())
}
