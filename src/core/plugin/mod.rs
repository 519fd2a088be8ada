//! Datasource backends and their lookup by plugin source.

pub mod plugin_registry;
pub mod query_executor;
pub mod remote_plugin_executor;
