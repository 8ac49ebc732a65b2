//! Dashboard API: registry, selection, reports and live events

pub mod events;
pub mod models;
pub mod reports;
pub mod selection;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the `/api` router
pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route(
            "/models",
            get(models::list_models).post(models::register_model),
        )
        .route(
            "/models/{model_id}",
            get(models::get_model).delete(models::delete_model),
        )
        .route("/models/{model_id}/select", post(selection::toggle_selection))
        .route("/models/{model_id}/report", get(reports::single_report))
        .route(
            "/selection",
            get(selection::list_selection).delete(selection::clear_selection),
        )
        .route("/selection/all", post(selection::select_all))
        .route("/reports/comparison", get(reports::comparison_report))
        .route("/stats", get(models::get_stats))
        .route("/events", get(events::stream_events))
}
