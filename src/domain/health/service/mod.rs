pub mod circle_metric_service;
pub mod plugin_gateway;
