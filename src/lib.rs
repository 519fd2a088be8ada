//! Circle component metrics: resolves the workspace datasource backend,
//! builds the metric query and assembles one series per deployed component.

pub mod api;
pub mod app_state;
pub mod core;
pub mod domain;
pub mod errors;
pub mod routes;
