use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::circle_metrics_dto::CircleComponentsMetricsQuery;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::client::moove_client::{CIRCLE_ID_HEADER, WORKSPACE_ID_HEADER};
use crate::domain::health::model::ComponentMetricRepresentation;
use crate::errors::AppError;

pub struct CircleMetricsController;

impl CircleMetricsController {
    pub async fn get_circle_components_metrics(
        State(state): State<AppState>,
        Path(circle_id): Path<String>,
        Query(q): Query<CircleComponentsMetricsQuery>,
        headers: HeaderMap,
    ) -> Result<Json<ApiResponse<ComponentMetricRepresentation>>, AppError> {
        q.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let workspace_id = workspace_id(&headers)?;
        let circle_header = header_value(&headers, CIRCLE_ID_HEADER)?;

        to_json(
            state
                .metric_service
                .components(
                    &circle_header,
                    &circle_id,
                    &q.projection_type,
                    &q.metric_type,
                    workspace_id,
                )
                .await,
        )
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Result<String, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(format!("missing {name} header")))
}

fn workspace_id(headers: &HeaderMap) -> Result<Uuid, AppError> {
    let raw = header_value(headers, WORKSPACE_ID_HEADER)?;
    Uuid::parse_str(&raw)
        .map_err(|e| AppError::BadRequest(format!("invalid {WORKSPACE_ID_HEADER} header: {e}")))
}
