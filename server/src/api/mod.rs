pub mod recipes;

use crate::query::PaginationError;
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipe_core::FilterError;
use serde::Serialize;
use thiserror::Error;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a handler can return. Client errors are decided before the store is
/// touched.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pagination(_) | ApiError::Filter(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            ApiError::Store(StoreError::Connection(e)) => {
                tracing::error!(error = %e, "Failed to get database connection");
                "Database connection failed".to_string()
            }
            ApiError::Store(StoreError::Query(e)) => {
                tracing::error!(error = %e, "Recipe query failed");
                "Failed to fetch recipes".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipes API", version = "1.0.0"),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();
    spec.merge(recipes::ApiDoc::openapi());
    spec
}
