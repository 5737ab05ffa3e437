//! # API Errors
//!
//! Every error response is a JSON object with an `error` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::feedback::FeedbackError;

/// Routes listed in the 404 body for unknown paths
pub const AVAILABLE_ROUTES: [&str; 4] = [
    "POST /feedback",
    "GET /feedback",
    "GET /feedback?id=123",
    "DELETE /feedback?id=123",
];

/// Errors returned by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    #[error("Method {0} not allowed on /feedback")]
    MethodNotAllowed(String),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_routes: Option<Vec<String>>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Feedback(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        let details = match self {
            ApiError::Feedback(e) => e.details().map(str::to_string),
            _ => None,
        };
        let available_routes = match self {
            ApiError::RouteNotFound => {
                Some(AVAILABLE_ROUTES.iter().map(|r| r.to_string()).collect())
            }
            _ => None,
        };

        ErrorResponse {
            error: self.to_string(),
            details,
            available_routes,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(FeedbackError::MissingId).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(FeedbackError::NotFound("1".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MethodNotAllowed("PUT".into()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("task cancelled".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_malformed_body_includes_details() {
        let body = ApiError::from(FeedbackError::MalformedBody("EOF".into())).body();
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"error": "Invalid JSON in request body", "details": "EOF"})
        );
    }

    #[test]
    fn test_route_not_found_lists_routes() {
        let value = serde_json::to_value(ApiError::RouteNotFound.body()).unwrap();
        assert_eq!(value["error"], "Route not found");
        assert_eq!(value["availableRoutes"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_method_not_allowed_message() {
        let value = serde_json::to_value(ApiError::MethodNotAllowed("PATCH".into()).body()).unwrap();
        assert_eq!(value, json!({"error": "Method PATCH not allowed on /feedback"}));
    }
}
