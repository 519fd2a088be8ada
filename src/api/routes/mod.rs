//! API route declarations (e.g., /api/v1/*)

pub mod metrics_routes;
