//! Error responses for the plan API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced to API callers
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or incomplete request (400)
    Validation {
        message: String,
        missing_fields: Option<Vec<String>>,
    },
    /// Model or catalog failed to load at startup (500)
    Unavailable,
    /// Plan assembly failed after the request was accepted (500)
    Generation(String),
}

impl From<planner_core::Error> for ApiError {
    fn from(err: planner_core::Error) -> Self {
        match err {
            planner_core::Error::MissingFields(fields) => ApiError::Validation {
                message: "Missing required fields".into(),
                missing_fields: Some(fields),
            },
            e if e.is_validation() => ApiError::Validation {
                message: e.to_string(),
                missing_fields: None,
            },
            e => ApiError::Generation(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation {
                message,
                missing_fields: Some(fields),
            } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "missing_fields": fields }),
            ),
            ApiError::Validation { message, .. } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::Unavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Model or exercise data not loaded" }),
            ),
            ApiError::Generation(message) => {
                tracing::error!("Error generating plan: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to generate workout plan",
                        "message": message,
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_map_to_validation() {
        let err = ApiError::from(planner_core::Error::MissingFields(vec!["Age".into()]));
        match err {
            ApiError::Validation {
                message,
                missing_fields,
            } => {
                assert_eq!(message, "Missing required fields");
                assert_eq!(missing_fields, Some(vec!["Age".to_string()]));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_classifier_failure_maps_to_generation() {
        let err = ApiError::from(planner_core::Error::Classifier("bad input".into()));
        assert!(matches!(err, ApiError::Generation(msg) if msg.contains("bad input")));
    }

    #[test]
    fn test_status_codes() {
        let validation = ApiError::Validation {
            message: "Invalid weight or height values".into(),
            missing_fields: None,
        };
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Unavailable.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
