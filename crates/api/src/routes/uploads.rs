//! Object storage routes.
//!
//! Multipart uploads under fixed folders, and delete by key.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState,
    extractors::{MultipartForm, ValidJson},
    middleware::AuthUser,
    response::{ApiError, ApiResponse, ApiResult},
};
use amaramba_core::upload::{UploadService, UploadedObject};

/// Folder for scanned images.
pub const SCAN_FOLDER: &str = "QRSCAN";
/// Folder for uploaded PDFs.
pub const PDF_FOLDER: &str = "QRSCAN/PDFs";
/// Folder for report uploads.
pub const REPORT_FOLDER: &str = "QR-REPORT";

const FILE_FIELD: &str = "file";
pub(crate) const PDF_MIME_TYPE: &str = "application/pdf";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a file upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    /// Public URL of the stored file.
    pub image_url: String,
    /// Generated file name.
    pub file_name: String,
    /// Full object key.
    pub key: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Folder the file was stored under.
    pub folder: &'static str,
}

/// Response for a PDF upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfUploadResponse {
    /// Public URL of the stored PDF.
    pub pdf_url: String,
    /// Generated file name.
    pub file_name: String,
    /// Full object key.
    pub key: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Folder the file was stored under.
    pub folder: &'static str,
}

/// Request body for deleting an object.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteObjectRequest {
    /// Object key to delete.
    #[serde(default)]
    #[validate(length(min = 1, message = "Object key is required"))]
    pub key: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn upload_service(state: &AppState) -> Result<&Arc<UploadService>, ApiError> {
    state.uploads.as_ref().ok_or_else(ApiError::storage_unavailable)
}

/// Reads the `file` part and stores it under `folder`.
async fn store_file(
    uploads: &UploadService,
    multipart: Multipart,
    folder: &'static str,
    required_type: Option<&str>,
) -> Result<UploadedObject, ApiError> {
    let mut form = MultipartForm::read(multipart)
        .await
        .map_err(|e| e.over_file_limit(uploads.config().max_file_size))?;
    let file = form
        .take_file(FILE_FIELD)
        .ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    if let Some(required) = required_type
        && file.content_type != required
    {
        return Err(ApiError::bad_request("Only PDF files are allowed"));
    }

    Ok(uploads.upload(file.into_upload(folder)).await?)
}

async fn upload_to_folder(
    state: &AppState,
    multipart: Multipart,
    folder: &'static str,
) -> ApiResult<FileUploadResponse> {
    let uploads = upload_service(state)?;
    let uploaded = store_file(uploads, multipart, folder, None).await?;

    Ok(ApiResponse::ok(
        FileUploadResponse {
            image_url: uploaded.url,
            file_name: uploaded.file_name,
            key: uploaded.key,
            file_size: uploaded.size,
            folder,
        },
        "File uploaded successfully to new folder",
    ))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/s3-upload/upload-single-new-folder`
pub async fn upload_to_scan_folder(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<FileUploadResponse> {
    upload_to_folder(&state, multipart, SCAN_FOLDER).await
}

/// POST `/api/uploads/s3-upload`
pub async fn upload_to_report_folder(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<FileUploadResponse> {
    upload_to_folder(&state, multipart, REPORT_FOLDER).await
}

/// POST `/s3-upload/upload-pdf`
pub async fn upload_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<PdfUploadResponse> {
    let uploads = upload_service(&state)?;
    let uploaded = store_file(uploads, multipart, PDF_FOLDER, Some(PDF_MIME_TYPE)).await?;

    Ok(ApiResponse::ok(
        PdfUploadResponse {
            pdf_url: uploaded.url,
            file_name: uploaded.file_name,
            key: uploaded.key,
            file_size: uploaded.size,
            folder: PDF_FOLDER,
        },
        "PDF uploaded successfully",
    ))
}

/// DELETE `/s3-upload/object`
pub async fn delete_object(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(payload): ValidJson<DeleteObjectRequest>,
) -> ApiResult<()> {
    let uploads = upload_service(&state)?;
    uploads.delete(&payload.key).await?;
    tracing::info!(user_id = %auth.user_id(), key = %payload.key, "Object deleted on request");
    Ok(ApiResponse::message("Object deleted successfully"))
}
