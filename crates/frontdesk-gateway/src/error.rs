// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from [`FrontdeskError`] to HTTP responses.
//!
//! Every failure is rendered as `{"success": false, "error": "<message>"}`.
//! Client errors carry their own message; server errors are logged in full
//! and answered with the endpoint's generic message.

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use frontdesk_core::FrontdeskError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    /// Maps `err`, answering server-side failures with `generic`.
    pub fn from_error(err: FrontdeskError, generic: &str) -> Self {
        let status = match &err {
            FrontdeskError::Validation(_) => StatusCode::BAD_REQUEST,
            FrontdeskError::Conflict { .. } => StatusCode::CONFLICT,
            FrontdeskError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            FrontdeskError::NotConfigured(_) => {
                error!(error = %err, "request needs an unconfigured service");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
            }
            _ => {
                error!(error = %err, "{generic}");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, generic);
            }
        };
        Self::new(status, err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<FrontdeskError> for ApiError {
    fn from(err: FrontdeskError) -> Self {
        Self::from_error(err, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                success: false,
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Returns a mapper that answers server errors with `generic`.
pub fn failed(generic: &'static str) -> impl Fn(FrontdeskError) -> ApiError {
    move |err| ApiError::from_error(err, generic)
}

/// JSON body extractor whose rejection uses the API error shape.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "rejected request body");
                Err(ApiError::bad_request("Invalid request body"))
            }
        }
    }
}
