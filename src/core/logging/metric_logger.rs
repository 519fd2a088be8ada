use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

/// Structured sink used on every failure path of a metric request.
pub trait MetricLogger: Send + Sync {
    fn info(&self, message: &str, data: &Value);

    fn error(&self, message: &str, function_name: &str, err: &dyn std::fmt::Display, data: &Value);
}

/// Forwards records to `tracing` events.
#[derive(Debug, Clone, Default)]
pub struct TracingMetricLogger;

impl MetricLogger for TracingMetricLogger {
    fn info(&self, message: &str, data: &Value) {
        info!(data = %data, "{}", message);
    }

    fn error(&self, message: &str, function_name: &str, err: &dyn std::fmt::Display, data: &Value) {
        error!(
            function_name = function_name,
            error = %err,
            data = %data,
            "{}",
            message
        );
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoopMetricLogger;

impl MetricLogger for NoopMetricLogger {
    fn info(&self, _message: &str, _data: &Value) {}

    fn error(&self, _message: &str, _function_name: &str, _err: &dyn std::fmt::Display, _data: &Value) {}
}

/// `ENV=TEST` silences all metric logging.
pub fn logger_for_env(env: &str) -> Arc<dyn MetricLogger> {
    if env == "TEST" {
        Arc::new(NoopMetricLogger)
    } else {
        Arc::new(TracingMetricLogger)
    }
}

pub mod messages {
    pub const QUERY_GET_PLUGIN_ERROR: &str = "Error to get plugin for query";
    pub const PLUGIN_NOT_FOUND_ERROR: &str = "Plugin not registered for datasource";
    pub const PLUGIN_QUERY_ERROR: &str = "Plugin query failed";
    pub const GET_COMPONENTS_ERROR: &str = "Error to get circle components";
    pub const PARSE_COMPONENTS_ERROR: &str = "Error to parse circle components";
    pub const METRIC_TYPE_ERROR: &str = "Unsupported metric type";
    pub const PROJECTION_TYPE_ERROR: &str = "Unknown projection type";
    pub const COMPONENTS_METRICS_DONE: &str = "Circle component metrics assembled";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct CountingLayer(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for CountingLayer {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn events_emitted(env: &str) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountingLayer(count.clone()));
        let err = anyhow::anyhow!("boom");

        tracing::subscriber::with_default(subscriber, || {
            let logger = logger_for_env(env);
            logger.info("hello", &Value::Null);
            logger.error("failed", "events_emitted", &err, &serde_json::json!({ "env": env }));
        });

        count.load(Ordering::SeqCst)
    }

    #[test]
    fn test_env_emits_nothing() {
        assert_eq!(events_emitted("TEST"), 0);
    }

    #[test]
    fn other_envs_emit_tracing_events() {
        assert_eq!(events_emitted("PROD"), 2);
        assert_eq!(events_emitted(""), 2);
        assert_eq!(events_emitted("test"), 2);
    }
}
