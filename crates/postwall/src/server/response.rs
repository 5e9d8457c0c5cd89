use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use postwallapp::error::WallError;
use serde::Serialize;
use tracing::{debug, error};

/// JSON envelope shared by every `/api` route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            field: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: impl Into<String>, field: Option<&'static str>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            field,
        }
    }
}

/// Anything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    Wall(WallError),
    /// The body could not be read as the expected JSON shape.
    InvalidBody(String),
    RouteNotFound,
}

impl From<WallError> for ApiError {
    fn from(err: WallError) -> Self {
        ApiError::Wall(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Wall(WallError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Wall(WallError::Unauthorized(_)) => StatusCode::FORBIDDEN,
            ApiError::Wall(WallError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Wall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Wall(err) if err.is_client_error() => {
                debug!(error = %err, "request rejected");
                ApiResponse::error(err.to_string(), err.field())
            }
            ApiError::Wall(err) => {
                error!(error = %err, "request failed");
                ApiResponse::error("Internal server error", None)
            }
            ApiError::InvalidBody(detail) => {
                debug!(detail = %detail, "unreadable request body");
                ApiResponse::error("Invalid request body", None)
            }
            ApiError::RouteNotFound => ApiResponse::error("Not found", None),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postwallapp::validation::ValidationError;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (
                ApiError::from(WallError::from(ValidationError::ContentTooLong)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(WallError::Unauthorized("Invalid edit ID".into())),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::from(WallError::NotFound("Post not found".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(WallError::Store("Failed to save post".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::InvalidBody("expected value".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status);
        }
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let ok = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "data": [1, 2]}));

        let err = serde_json::to_value(ApiResponse::error("Alias is required", Some("alias")))
            .unwrap();
        assert_eq!(
            err,
            serde_json::json!({"success": false, "error": "Alias is required", "field": "alias"})
        );
    }
}
