//! HTTP API handlers

pub mod error;
pub mod health;
pub mod plan;

pub use error::ApiError;
pub use health::health_routes;
pub use plan::generate_plan;
