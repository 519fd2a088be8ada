//! Request-scoped health metric types (periods, query envelope, component series).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A symbolic span of time such as `7d` or `15s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub value: i64,
    pub unit: String,
}

impl Period {
    pub fn new(value: i64, unit: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// One measurement returned by a backend, usually `{ts, value}`.
///
/// Kept as raw JSON so every field a backend emits reaches the caller as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValue(pub serde_json::Value);

/// Optional predicate narrowing a query. Always empty for circle metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricFilter {
    pub field: String,
    pub value: String,
    pub operator: String,
}

/// Normalized envelope handed to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub datasource_configuration: serde_json::Value,
    pub query: String,
    pub filters: Vec<MetricFilter>,
    pub range_period: Period,
    pub interval: Period,
}

/// Entry of the component list served by the deployment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInCircle {
    pub name: String,
    pub module_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRepresentation {
    pub name: String,
    pub module: String,
    pub data: Vec<MetricValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMetricRepresentation {
    pub period: String,
    #[serde(rename = "type")]
    pub metric_type: String,
    pub components: Vec<ComponentRepresentation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn period_displays_value_and_unit() {
        assert_eq!(Period::new(30, "m").to_string(), "30m");
        assert_eq!(Period::new(7, "d").to_string(), "7d");
    }

    #[test]
    fn query_request_uses_camel_case_keys() {
        let req = QueryRequest {
            datasource_configuration: json!({ "url": "http://prometheus:9090" }),
            query: "up".into(),
            filters: vec![],
            range_period: Period::new(1, "h"),
            interval: Period::new(1, "m"),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["datasourceConfiguration"]["url"], "http://prometheus:9090");
        assert_eq!(value["rangePeriod"], json!({ "value": 1, "unit": "h" }));
        assert!(value["filters"].as_array().unwrap().is_empty());
    }

    #[test]
    fn representation_serializes_type_field() {
        let rep = ComponentMetricRepresentation {
            period: "1h".into(),
            metric_type: "REQUESTS_BY_CIRCLE".into(),
            components: vec![ComponentRepresentation {
                name: "svc-a".into(),
                module: "mod1".into(),
                data: vec![MetricValue(json!({ "ts": 100, "value": 5.0, "labels": { "pod": "svc-a-1" } }))],
            }],
        };

        let value = serde_json::to_value(&rep).unwrap();
        assert_eq!(
            value,
            json!({
                "period": "1h",
                "type": "REQUESTS_BY_CIRCLE",
                "components": [
                    {
                        "name": "svc-a",
                        "module": "mod1",
                        "data": [{ "ts": 100, "value": 5.0, "labels": { "pod": "svc-a-1" } }]
                    }
                ]
            })
        );
    }

    #[test]
    fn deployment_list_decodes_module_name() {
        let list: Vec<DeploymentInCircle> =
            serde_json::from_str(r#"[{"name":"svc-a","moduleName":"mod1"}]"#).unwrap();
        assert_eq!(list[0].module_name, "mod1");
    }
}
