//! Metric type dispatch to backend query templates.

use crate::domain::health::error::MetricError;

const REQUEST_TOTAL_METRIC: &str = "istio_charles_request_total";
const REQUEST_DURATION_METRIC: &str = "istio_charles_request_duration_seconds";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    RequestsByCircle,
    ErrorsByCircle,
    LatencyByCircle,
}

impl MetricType {
    pub fn from_code<S: AsRef<str>>(code: S) -> Option<Self> {
        match code.as_ref() {
            "REQUESTS_BY_CIRCLE" => Some(Self::RequestsByCircle),
            "REQUESTS_ERRORS_BY_CIRCLE" => Some(Self::ErrorsByCircle),
            "REQUESTS_LATENCY_BY_CIRCLE" => Some(Self::LatencyByCircle),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::RequestsByCircle => "REQUESTS_BY_CIRCLE",
            Self::ErrorsByCircle => "REQUESTS_ERRORS_BY_CIRCLE",
            Self::LatencyByCircle => "REQUESTS_LATENCY_BY_CIRCLE",
        }
    }

    /// Measurement name tagging the result series.
    pub fn measurement(&self) -> &'static str {
        match self {
            Self::RequestsByCircle => "requests",
            Self::ErrorsByCircle => "errors_percentage",
            Self::LatencyByCircle => "average_latency",
        }
    }

    pub fn query_for(&self, circle_id: &str) -> String {
        let circle_id = escape_label_value(circle_id);
        let circle_id = circle_id.as_str();
        match self {
            Self::RequestsByCircle => total_requests_query(circle_id),
            Self::ErrorsByCircle => http_errors_percentage_query(circle_id),
            Self::LatencyByCircle => average_latency_query(circle_id),
        }
    }
}

/// A query string with the measurement it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub query: String,
    pub measurement: &'static str,
}

pub fn build_query(metric_type: &str, circle_id: &str) -> Result<BuiltQuery, MetricError> {
    let metric = MetricType::from_code(metric_type)
        .ok_or_else(|| MetricError::UnsupportedMetricType(metric_type.to_string()))?;

    Ok(BuiltQuery {
        query: metric.query_for(circle_id),
        measurement: metric.measurement(),
    })
}

/// Escapes a value for use inside a double-quoted label matcher.
fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn total_requests_query(circle_id: &str) -> String {
    format!(
        "sum(increase({REQUEST_TOTAL_METRIC}{{circle_source=\"{circle_id}\"}}[1m]))"
    )
}

fn http_errors_percentage_query(circle_id: &str) -> String {
    format!(
        "sum(rate({REQUEST_TOTAL_METRIC}{{circle_source=\"{circle_id}\", response_status=~\"5.*\"}}[1m])) \
         / sum(rate({REQUEST_TOTAL_METRIC}{{circle_source=\"{circle_id}\"}}[1m])) * 100"
    )
}

fn average_latency_query(circle_id: &str) -> String {
    format!(
        "sum(rate({REQUEST_DURATION_METRIC}_sum{{circle_source=\"{circle_id}\"}}[1m])) \
         / sum(rate({REQUEST_DURATION_METRIC}_count{{circle_source=\"{circle_id}\"}}[1m]))"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: [&str; 3] = [
        "REQUESTS_BY_CIRCLE",
        "REQUESTS_ERRORS_BY_CIRCLE",
        "REQUESTS_LATENCY_BY_CIRCLE",
    ];

    #[test]
    fn supported_types_build_deterministic_queries() {
        for code in SUPPORTED {
            let first = build_query(code, "c1").unwrap();
            let second = build_query(code, "c1").unwrap();
            assert!(!first.query.is_empty());
            assert_eq!(first, second);
            assert!(first.query.contains("circle_source=\"c1\""));
        }
    }

    #[test]
    fn each_type_maps_to_a_distinct_query() {
        let queries: Vec<String> = SUPPORTED
            .iter()
            .map(|c| build_query(c, "c1").unwrap().query)
            .collect();
        assert_ne!(queries[0], queries[1]);
        assert_ne!(queries[1], queries[2]);
        assert_ne!(queries[0], queries[2]);
    }

    #[test]
    fn query_depends_on_circle() {
        let a = build_query("REQUESTS_BY_CIRCLE", "c1").unwrap();
        let b = build_query("REQUESTS_BY_CIRCLE", "c2").unwrap();
        assert_ne!(a.query, b.query);
        assert_eq!(a.measurement, "requests");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = build_query("UNKNOWN_TYPE", "c1").unwrap_err();
        assert!(matches!(err, MetricError::UnsupportedMetricType(ref t) if t == "UNKNOWN_TYPE"));
    }

    #[test]
    fn circle_id_cannot_close_the_label_matcher() {
        let built = build_query(
            "REQUESTS_BY_CIRCLE",
            r#"x"} or istio_charles_request_total{circle_source=~".+"#,
        )
        .unwrap();

        assert_eq!(
            built.query,
            r#"sum(increase(istio_charles_request_total{circle_source="x\"} or istio_charles_request_total{circle_source=~\".+"}[1m]))"#
        );
    }

    #[test]
    fn backslashes_and_newlines_are_escaped() {
        assert_eq!(escape_label_value(r"a\b"), r"a\\b");
        assert_eq!(escape_label_value("a\nb"), r"a\nb");
        assert_eq!(escape_label_value("c1"), "c1");
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert_eq!(MetricType::from_code("requests_by_circle"), None);
        assert_eq!(
            MetricType::from_code(MetricType::LatencyByCircle.as_code()),
            Some(MetricType::LatencyByCircle)
        );
    }
}
