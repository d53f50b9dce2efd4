//! REST API module.
//!
//! Contains all routes and handlers following the front-end contract. Every
//! JSON route answers with the same envelope: `{ success, data }` on success,
//! `{ success, error }` on failure.

mod accounts;
mod admins;
mod content;
mod players;
mod teams;

pub use accounts::*;
pub use admins::*;
pub use content::*;
pub use players::*;
pub use teams::*;

use axum::{
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// JSON request body whose rejections answer inside the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Create a `201 Created` API response.
pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::CREATED,
        ..ApiResponse::new(data)
    })
}

/// Validate a record id taken from the path or body.
pub(crate) fn parse_record_id(raw: &str) -> Result<String, AppError> {
    uuid::Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| AppError::BadRequest(format!("Invalid id format: {}", raw)))
}

/// Validate a numeric team id taken from the path.
pub(crate) fn parse_team_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid team id: {}", raw)))
}

/// Parse a team id sent as a form field.
pub(crate) fn parse_team_field(field: &str, raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Field '{}' must be an integer", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        let id = uuid::Uuid::new_v4().to_string();
        assert_eq!(parse_record_id(&id).unwrap(), id);
        assert!(matches!(
            parse_record_id("64f1c2e9a1b2c3d4e5f60718"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_parse_team_ids() {
        assert_eq!(parse_team_id(" 42 ").unwrap(), 42);
        assert!(parse_team_id("abc").is_err());
        assert!(matches!(
            parse_team_field("time", "1.5"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_created_status() {
        let response = created(1).unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(success(1).unwrap().status, StatusCode::OK);
    }
}
