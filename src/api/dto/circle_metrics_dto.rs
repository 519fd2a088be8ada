use serde::Deserialize;
use validator::Validate;

/// Query string of `GET /circles/{circle_id}/components/metrics`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CircleComponentsMetricsQuery {
    #[validate(length(min = 1))]
    pub projection_type: String,

    #[validate(length(min = 1))]
    pub metric_type: String,
}
