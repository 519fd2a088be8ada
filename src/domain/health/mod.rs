//! Circle health metrics: projection windows, query templates, backend dispatch and aggregation.

pub mod error;
pub mod model;
pub mod projection;
pub mod query;
pub mod service;
