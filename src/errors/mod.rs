//! Error handling module for the e-sports backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and the
//! response envelope shared by every JSON route.

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DUPLICATE_FIELD: &str = "DUPLICATE_FIELD";
    pub const CONFLICT: &str = "CONFLICT";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
    pub const UNSUPPORTED_MEDIA_TYPE: &str = "UNSUPPORTED_MEDIA_TYPE";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Authentication required or rejected
    Unauthorized(String),
    /// Resource not found
    NotFound(String),
    /// Validation error
    Validation(String),
    /// Required fields absent or blank
    MissingFields(Vec<String>),
    /// Unique constraint violated on the named fields
    Duplicate(Vec<String>),
    /// Operation blocked by the current state of related records
    Conflict(String),
    /// Malformed request
    BadRequest(String),
    /// Uploaded file over the size cap
    PayloadTooLarge(String),
    /// Uploaded file is not an accepted image
    UnsupportedMedia(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) | AppError::MissingFields(_) => codes::VALIDATION_ERROR,
            AppError::Duplicate(_) => codes::DUPLICATE_FIELD,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => codes::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMedia(_) => codes::UNSUPPORTED_MEDIA_TYPE,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::MissingFields(fields) => {
                format!("Missing required fields: {}", fields.join(", "))
            }
            AppError::Duplicate(fields) => format!("Already in use: {}", fields.join(", ")),
            AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::UnsupportedMedia(msg)
            | AppError::Database(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::MissingFields(fields) | AppError::Duplicate(fields) => {
                Some(serde_json::json!({ "fields": fields }))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(fields) = unique_violation_fields(&err) {
            tracing::debug!("Unique constraint violated on {:?}", fields);
            return AppError::Duplicate(fields);
        }
        tracing::error!("Database error: {:?}", err);
        AppError::Database("Database operation failed".to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        tracing::warn!("Multipart error: {}", err);
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(err.body_text());
        }
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        rejection_error(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!("Rejected multipart body: {}", rejection.body_text());
        rejection_error(rejection.status(), rejection.body_text())
    }
}

/// Keep the extractor's status class, but answer inside the envelope.
fn rejection_error(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::UNSUPPORTED_MEDIA_TYPE => AppError::UnsupportedMedia(message),
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(message),
        StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(message),
        _ => AppError::BadRequest(message),
    }
}

/// Extract the offending fields from a unique-constraint violation.
///
/// SQLite reports these as `UNIQUE constraint failed: teams.name, teams.route`;
/// column names are translated to the JSON keys clients send.
fn unique_violation_fields(err: &sqlx::Error) -> Option<Vec<String>> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let message = db_err.message();
    let columns = message.strip_prefix("UNIQUE constraint failed: ")?;

    Some(
        columns
            .split(',')
            .map(|qualified| {
                let column = qualified.trim().rsplit('.').next().unwrap_or_default();
                api_field_name(column).to_string()
            })
            .collect(),
    )
}

/// Map a column name to the field name used in requests and responses.
fn api_field_name(column: &str) -> &str {
    match column {
        "name" => "nome",
        "route" => "rota",
        "title" => "titulo",
        "description" => "descricao",
        "instagram" => "insta",
        "team_id" => "time",
        other => other,
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details: error.details(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse::new(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MissingFields(vec!["nome".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Duplicate(vec!["rota".into()]).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::UnsupportedMedia("gif".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_envelope_names_fields() {
        let body = ErrorResponse::new(&AppError::Duplicate(vec!["nome".to_string()]));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], codes::DUPLICATE_FIELD);
        assert_eq!(json["error"]["details"]["fields"][0], "nome");
        assert!(json["error"]["message"].as_str().unwrap().contains("nome"));
    }

    #[test]
    fn test_details_omitted_for_plain_errors() {
        let body = ErrorResponse::new(&AppError::NotFound("Team 3 not found".into()));
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["error"].get("details").is_none());
    }

    #[test]
    fn test_rejection_status_is_kept() {
        assert!(matches!(
            rejection_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, "json".into()),
            AppError::UnsupportedMedia(_)
        ));
        assert!(matches!(
            rejection_error(StatusCode::UNPROCESSABLE_ENTITY, "shape".into()),
            AppError::Validation(_)
        ));
        assert!(matches!(
            rejection_error(StatusCode::BAD_REQUEST, "boundary".into()),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn test_api_field_name_mapping() {
        assert_eq!(api_field_name("name"), "nome");
        assert_eq!(api_field_name("route"), "rota");
        assert_eq!(api_field_name("login"), "login");
        assert_eq!(api_field_name("id"), "id");
    }
}
