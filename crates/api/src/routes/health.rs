//! Health check endpoint.

use serde::Serialize;

use crate::response::ApiResponse;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// GET `/health`
pub async fn health_check() -> ApiResponse<HealthResponse> {
    ApiResponse::ok(
        HealthResponse {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        },
        "Service is healthy",
    )
}
