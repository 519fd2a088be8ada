pub mod metric_logger;
pub mod tracing_init;
