//! JSON response envelope and error mapping.
//!
//! Every JSON body has the shape
//! `{ "success": bool, "message": string, "data"?: any, "error"?: string }`.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use amaramba_core::upload::{UploadError, size_limit_message};
use amaramba_db::RepositoryError;
use amaramba_shared::AppError;

/// Successful response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    status: StatusCode,
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with data.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// 201 with data.
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(data, message)
        }
    }
}

impl ApiResponse<()> {
    /// 200 without data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    error: &'static str,
}

/// Handler error. Renders `AppError` as a failure envelope.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with a message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 404 with a message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 503 for routes whose object storage is not configured.
    pub fn storage_unavailable() -> Self {
        Self(AppError::Unavailable(
            "File storage is not configured".to_string(),
        ))
    }

    /// Reports an oversized multipart body as the upload size limit.
    #[must_use]
    pub fn over_file_limit(self, max_file_size: u64) -> Self {
        match self.0 {
            AppError::PayloadTooLarge(_) => {
                Self(AppError::PayloadTooLarge(size_limit_message(max_file_size)))
            }
            other => Self(other),
        }
    }

    /// Prefix the client-facing message, keeping the status.
    #[must_use]
    pub fn context(self, prefix: &str) -> Self {
        let wrap = |msg: String| format!("{prefix}: {msg}");
        Self(match self.0 {
            AppError::Validation(m) => AppError::Validation(wrap(m)),
            AppError::ExternalService(m) => AppError::ExternalService(wrap(m)),
            AppError::Unavailable(m) => AppError::Unavailable(wrap(m)),
            other => other,
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = ErrorBody {
            success: false,
            message: self.0.public_message(),
            error: self.0.error_code(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Validation(e) => Self(AppError::Validation(e.to_string())),
            UploadError::Storage(e) => Self(AppError::ExternalService(e.to_string())),
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateEmail(_) => Self(AppError::Conflict(
                "Customer with this email already exists".to_string(),
            )),
            RepositoryError::Database(e) => e.into(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let fields: BTreeMap<_, _> = err.field_errors().into_iter().collect();
        let message = fields
            .into_values()
            .flat_map(|errors| errors.iter())
            .find_map(|e| e.message.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| err.to_string());
        Self(AppError::Validation(message))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self(AppError::PayloadTooLarge(err.body_text()))
        } else {
            Self(AppError::Validation(err.body_text()))
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
