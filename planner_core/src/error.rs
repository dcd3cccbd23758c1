//! Error types for the planner_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for planner_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Required profile fields were absent from the request
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A request field was present but malformed
    #[error("{0}")]
    Validation(String),

    /// Model file could not be loaded or could not score a profile
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Plan assembly failed after the request was accepted
    #[error("Plan generation error: {0}")]
    Generation(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the service
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingFields(_) | Error::Validation(_))
    }
}
