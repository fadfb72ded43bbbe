//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes built from an explicit route table
//! - JWT authentication and role middleware
//! - Request extractors
//! - The JSON response envelope

pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use amaramba_core::upload::{UploadConfig, UploadService};
use amaramba_shared::{AppError, JwtService};

use crate::response::ApiError;

/// Headroom above the file size limit for multipart framing and text fields.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
    /// Upload service; `None` when object storage is not configured.
    pub uploads: Option<Arc<UploadService>>,
}

impl AppState {
    /// Upload size limit in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.uploads
            .as_ref()
            .map_or(UploadConfig::DEFAULT_MAX_FILE_SIZE, |u| u.config().max_file_size)
    }

    /// Largest request body accepted.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.max_file_size().saturating_add(MULTIPART_OVERHEAD))
            .unwrap_or(usize::MAX)
    }
}

async fn route_not_found() -> ApiError {
    ApiError(AppError::NotFound("Route not found".to_string()))
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(&state))
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(state.body_limit()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
