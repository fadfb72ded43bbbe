//! Public form submission.
//!
//! A visitor scans a product code, enters an email and the batch number,
//! and receives the product PDF link. Each submission is recorded.

use axum::extract::State;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState,
    extractors::{ClientMeta, ValidJson},
    response::{ApiError, ApiResponse, ApiResult},
};
use amaramba_db::{CreateCustomerInput, CustomerRepository, ProductRepository};

/// Request body for a submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    /// Visitor email.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email and batch number are required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    /// Batch number from the product.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and batch number are required"))]
    pub batch_no: String,
}

/// Response for a submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    /// Product PDF link.
    pub pdf_url: String,
    /// Product name.
    pub product_name: String,
    /// When the submission was recorded.
    pub submitted_at: DateTime<FixedOffset>,
}

/// POST `/api/submission`
pub async fn submit_form(
    State(state): State<AppState>,
    ClientMeta(client): ClientMeta,
    ValidJson(payload): ValidJson<SubmissionRequest>,
) -> ApiResult<SubmissionResponse> {
    let email = payload.email.trim().to_string();
    let batch_no = payload.batch_no.trim().to_string();

    let product = ProductRepository::new(&state.db)
        .find_by_batch_no(&batch_no)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found for the given batch number"))?;

    let Some(pdf_url) = product.pdf_url.filter(|url| !url.is_empty()) else {
        return Err(ApiError::not_found("PDF not available for this product"));
    };

    let customer = CustomerRepository::new(&state.db)
        .record_submission(CreateCustomerInput {
            email,
            batch_no,
            ip_address: client.ip_address,
            device: Some(client.device.device),
            os: Some(client.device.os),
            location: Some(client.location),
            browser: Some(client.device.browser),
        })
        .await?;

    tracing::info!(
        customer_id = %customer.id,
        batch_no = %customer.batch_no,
        ip_address = %customer.ip_address,
        location = customer.location.as_deref().unwrap_or_default(),
        "Form submission stored"
    );

    Ok(ApiResponse::ok(
        SubmissionResponse {
            pdf_url,
            product_name: product.name,
            submitted_at: customer.submitted_at,
        },
        "Form submitted successfully",
    ))
}
