//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::receipts::{ReceiptRequestError, SendReceiptError};

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "Internal server error")]
    pub error: String,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "Internal server error")]
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<ReceiptRequestError> for ApiError {
    fn from(err: ReceiptRequestError) -> Self {
        match err {
            ReceiptRequestError::MissingFields(fields) => {
                ApiError::new_400(&format!("Missing required fields: {}", fields.join(", ")))
            }
        }
    }
}

impl From<SendReceiptError> for ApiError {
    fn from(err: SendReceiptError) -> Self {
        match err {
            SendReceiptError::NotConfigured(detail) => {
                error!("mail transport is not configured: {detail}");
                ApiError::new_500("Mail service is not configured on the server")
            }
            SendReceiptError::CouldNotSendEmail(err) => {
                error!("could not send receipt email: {err}");
                ApiError::new_500("Could not send receipt email")
            }
            SendReceiptError::RenderError(err) => unknown_error(&err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("rejected request body: {}", rejection.body_text());

        ApiError::new_400(&rejection.body_text())
    }
}

fn unknown_error(detail: &str) -> ApiError {
    error!("unexpected error: {detail}");

    ApiError::new_500("An unknown error occurred, please try again")
}
