use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::domain::health::error::MetricError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<MetricError> for AppError {
    fn from(err: MetricError) -> Self {
        let message = err.to_string();
        match err {
            MetricError::UnsupportedMetricType(_) | MetricError::UnknownProjection(_) => {
                AppError::BadRequest(message)
            }
            MetricError::DatasourceNotFound(_) => AppError::NotFound(message),
            MetricError::ComponentListUnavailable(_)
            | MetricError::MalformedComponentList(_)
            | MetricError::Backend(_) => AppError::UpstreamError(message),
            MetricError::PluginNotFound(_) | MetricError::DatasourceLookup(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
