//! Health check handler

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `true` while the process serves requests
    #[schema(example = true)]
    pub ok: bool,
}

/// Report that the service is up
#[utoipa::path(
    get,
    operation_id = "health",
    tag = "System",
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
