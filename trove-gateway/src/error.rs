//! Error types for the gateway crate.
//!
//! Every error renders as a JSON body with an `error` label and a
//! human-readable `message`; validation errors add the offending or
//! required field names.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use trove_core::{StoreError, ValidationError};

/// Field names accepted in a user update body, besides `id`.
pub const ALLOWED_USER_FIELDS: &[&str] = &["name", "email", "age"];

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Required body fields are absent.
    #[error("{message}")]
    MissingFields {
        message: String,
        required: &'static [&'static str],
    },

    /// A field or path value is present but malformed; `label` is the short
    /// `error` key reported to the client.
    #[error("{message}")]
    Invalid { label: &'static str, message: String },

    /// An update body contains field names outside the allowed set.
    #[error("fields not allowed: {}", invalid.join(", "))]
    UnknownFields { invalid: Vec<String> },

    /// The addressed record does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// A uniqueness constraint was violated.
    #[error("{message}")]
    Conflict { label: &'static str, message: String },

    /// The method is not supported on the by-id product resource.
    #[error("this endpoint accepts GET and DELETE only")]
    MethodNotAllowed,

    /// Unexpected internal failure.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Shorthand for [`ApiError::MissingFields`].
    pub fn missing(message: impl Into<String>, required: &'static [&'static str]) -> Self {
        Self::MissingFields { message: message.into(), required }
    }

    /// Shorthand for [`ApiError::Invalid`].
    pub fn invalid(label: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid { label, message: message.into() }
    }

    /// Map a store failure for the given resource noun ("user", "product").
    #[must_use]
    pub fn from_store(err: StoreError, resource: &str) -> Self {
        match err {
            StoreError::Validation(v) => Self::from(v),
            StoreError::NotFound(id) => Self::NotFound {
                message: format!("no {resource} with id {id} exists"),
            },
            StoreError::DuplicateEmail(email) => Self::Conflict {
                label: "duplicate email",
                message: format!("a user with email '{email}' already exists"),
            },
            StoreError::DuplicateName(name) => Self::Conflict {
                label: "duplicate product",
                message: format!("a product named '{name}' already exists"),
            },
            _ => Self::Internal,
        }
    }

    /// The short `error` label for the JSON body.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingFields { .. } => "missing fields",
            Self::Invalid { label, .. } | Self::Conflict { label, .. } => label,
            Self::UnknownFields { .. } => "invalid fields",
            Self::NotFound { .. } => "not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Internal => "internal server error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields { .. } | Self::Invalid { .. } | Self::UnknownFields { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let label = match err {
            ValidationError::InvalidEmail => "invalid email",
            ValidationError::AgeOutOfRange => "invalid age",
            ValidationError::EmptyName => "invalid name",
            ValidationError::InvalidPrice => "invalid price",
            _ => "invalid input",
        };
        Self::Invalid { label, message: err.to_string() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Invalid {
            label: "invalid json",
            message: format!("request body is not valid JSON: {rejection}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.label(),
            "message": self.to_string(),
        });
        match &self {
            Self::MissingFields { required, .. } => {
                body["required"] = json!(required);
            }
            Self::UnknownFields { invalid } => {
                body["invalidFields"] = json!(invalid);
                body["allowedFields"] = json!(ALLOWED_USER_FIELDS);
            }
            Self::MethodNotAllowed => {
                body["allowedMethods"] = json!(["GET", "DELETE"]);
            }
            _ => {}
        }

        let mut response = (self.status(), Json(body)).into_response();
        if matches!(self, Self::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, DELETE"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = match axum::body::to_bytes(response.into_body(), 4096).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[test]
    fn api_error_status_codes_map_correctly() {
        let cases = [
            (ApiError::missing("x", &["name"]), StatusCode::BAD_REQUEST),
            (ApiError::invalid("invalid id", "x"), StatusCode::BAD_REQUEST),
            (
                ApiError::UnknownFields { invalid: vec!["role".to_owned()] },
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::NotFound { message: "x".to_owned() },
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Conflict { label: "duplicate email", message: "x".to_owned() },
                StatusCode::CONFLICT,
            ),
            (ApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn missing_fields_body_enumerates_required() {
        let err = ApiError::missing("name, email and age are required", &["name", "email", "age"]);
        let body = body_json(err.into_response()).await;
        assert_eq!(body["error"], "missing fields");
        assert_eq!(body["required"], json!(["name", "email", "age"]));
    }

    #[tokio::test]
    async fn unknown_fields_body_lists_both_sides() {
        let err = ApiError::UnknownFields { invalid: vec!["role".to_owned()] };
        let body = body_json(err.into_response()).await;
        assert_eq!(body["invalidFields"], json!(["role"]));
        assert_eq!(body["allowedFields"], json!(["name", "email", "age"]));
    }

    #[tokio::test]
    async fn method_not_allowed_sets_allow_header_and_body() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(header::ALLOW).and_then(|v| v.to_str().ok()),
            Some("GET, DELETE")
        );
        let body = body_json(response).await;
        assert_eq!(body["allowedMethods"], json!(["GET", "DELETE"]));
    }

    #[test]
    fn store_not_found_names_the_resource() {
        let err = ApiError::from_store(StoreError::NotFound(9999), "product");
        assert!(err.to_string().contains("no product with id 9999"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_map_to_bad_request_with_specific_labels() {
        let err = ApiError::from(ValidationError::InvalidEmail);
        assert_eq!(err.label(), "invalid email");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from_store(
            StoreError::Validation(ValidationError::InvalidPrice),
            "product",
        );
        assert_eq!(err.label(), "invalid price");
    }
}
