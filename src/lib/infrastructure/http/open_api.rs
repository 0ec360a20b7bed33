//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{
    errors::ErrorResponse,
    handlers::{health, send_receipt},
};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Receipt Mailer"),
    paths(health::handler, send_receipt::handler),
    components(schemas(
        health::HealthResponse,
        send_receipt::SendReceiptBody,
        send_receipt::SendReceiptResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
