//! Wire types shared by the HTTP handlers

pub mod error;
pub mod json;
pub mod models;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use models::{
    ListResponse, ModelView, ModelsQuery, RegisterModelRequest, SelectionResponse, StatsResponse,
};
