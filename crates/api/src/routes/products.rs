//! Product management routes.

use axum::extract::{Multipart, Path, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::uploads::{PDF_FOLDER, PDF_MIME_TYPE};
use crate::{
    AppState,
    extractors::{MultipartForm, ValidJson},
    middleware::AuthUser,
    response::{ApiError, ApiResponse, ApiResult},
};
use amaramba_db::entities::products;
use amaramba_db::{CreateProductInput, ProductRepository, UpdateProductInput};

const NOT_FOUND: &str = "Product not found";

// ============================================================================
// Request Types
// ============================================================================

/// Request body for updating a product.
///
/// Absent fields are left alone; an empty string clears an optional field.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// Product name.
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Batch number.
    #[validate(length(min = 1, max = 100, message = "Batch number cannot be empty"))]
    pub batch_no: Option<String>,
    /// PDF URL.
    pub pdf_url: Option<String>,
}

impl From<UpdateProductRequest> for UpdateProductInput {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description.map(clear_if_blank),
            batch_no: req.batch_no,
            pdf_url: req.pdf_url.map(clear_if_blank),
        }
    }
}

/// Empty or whitespace-only strings clear the field.
pub(crate) fn clear_if_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses a path ID; malformed IDs cannot match a row.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(not_found))
}

fn repository(state: &AppState) -> ProductRepository<'_> {
    ProductRepository::new(&state.db)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/api/products`
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<products::Model>> {
    let products = repository(&state).list().await?;
    let message = if products.is_empty() {
        "No products found"
    } else {
        "Products retrieved successfully"
    };
    Ok(ApiResponse::ok(products, message))
}

/// GET `/api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<products::Model> {
    let id = parse_id(&id, NOT_FOUND)?;
    let product = repository(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::ok(product, "Product retrieved successfully"))
}

/// POST `/api/products`
///
/// Multipart form with `name`, `batchNo`, `description`, `pdfUrl` and an
/// optional `pdfFile`. A PDF file is stored and its URL replaces `pdfUrl`.
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<products::Model> {
    let mut form = MultipartForm::read(multipart)
        .await
        .map_err(|e| e.over_file_limit(state.max_file_size()))?;

    let (Some(name), Some(batch_no)) = (form.text("name"), form.text("batchNo")) else {
        return Err(ApiError::bad_request("Name and batch number are required"));
    };

    let mut pdf_url = form.text("pdfUrl");
    if let Some(file) = form
        .take_file("pdfFile")
        .filter(|file| file.content_type == PDF_MIME_TYPE)
    {
        let uploads = state.uploads.as_ref().ok_or_else(ApiError::storage_unavailable)?;
        let uploaded = uploads
            .upload(file.into_upload(PDF_FOLDER))
            .await
            .map_err(|e| ApiError::from(e).context("Failed to upload PDF"))?;
        pdf_url = Some(uploaded.url);
    }

    let product = repository(&state)
        .create(CreateProductInput {
            name,
            description: form.text("description"),
            batch_no,
            pdf_url,
        })
        .await?;

    tracing::info!(product_id = %product.id, batch_no = %product.batch_no, "Product created");
    Ok(ApiResponse::created(product, "Product created successfully"))
}

/// PUT `/api/products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateProductRequest>,
) -> ApiResult<products::Model> {
    let id = parse_id(&id, NOT_FOUND)?;
    let product = repository(&state)
        .update(id, payload.into())
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::ok(product, "Product updated successfully"))
}

/// DELETE `/api/products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, NOT_FOUND)?;
    if !repository(&state).delete(id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    tracing::info!(product_id = %id, user_id = %auth.user_id(), "Product deleted");
    Ok(ApiResponse::message("Product deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case(" spec.pdf ", Some("spec.pdf"))]
    fn test_clear_if_blank(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(clear_if_blank(input.to_string()).as_deref(), expected);
    }

    #[test]
    fn test_update_request_maps_clears() {
        let input: UpdateProductInput = UpdateProductRequest {
            description: Some(String::new()),
            pdf_url: Some("https://cdn.example.com/b.pdf".to_string()),
            ..UpdateProductRequest::default()
        }
        .into();
        assert_eq!(input.description, Some(None));
        assert_eq!(
            input.pdf_url,
            Some(Some("https://cdn.example.com/b.pdf".to_string()))
        );
        assert!(input.name.is_none());
    }

    #[test]
    fn test_update_request_rejects_empty_name() {
        let request = UpdateProductRequest {
            name: Some(String::new()),
            ..UpdateProductRequest::default()
        };
        assert!(request.validate().is_err());
    }
}
