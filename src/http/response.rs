//! Error responses.
//!
//! # Responsibilities
//! - Map input errors to `400 Bad Request`
//! - Render the error message verbatim in a JSON body
//!
//! # Design Decisions
//! - Input errors are client mistakes: logged at debug, never at error

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::policy::InputError;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejected request input");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_is_bad_request() {
        let response = InputError::MissingParameter("text").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
