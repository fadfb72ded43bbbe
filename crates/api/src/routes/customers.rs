//! Customer management routes.

use axum::extract::{Path, State};
use serde::Deserialize;
use validator::Validate;

use super::products::{clear_if_blank, parse_id};
use crate::{
    AppState,
    extractors::ValidJson,
    response::{ApiError, ApiResponse, ApiResult},
};
use amaramba_db::entities::customers;
use amaramba_db::{CreateCustomerInput, CustomerRepository, UpdateCustomerInput};

const NOT_FOUND: &str = "Customer not found";
const UNKNOWN_IP: &str = "unknown";

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a customer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    /// Email.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email and batch number are required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    /// Batch number.
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Email and batch number are required"))]
    pub batch_no: String,
    /// Client IP address; defaults to `unknown`.
    #[validate(length(max = 45, message = "IP address is too long"))]
    pub ip_address: Option<String>,
    /// Device label.
    #[validate(length(max = 255, message = "Device is too long"))]
    pub device: Option<String>,
    /// Operating system label.
    #[validate(length(max = 255, message = "OS is too long"))]
    pub os: Option<String>,
    /// Location label.
    #[validate(length(max = 255, message = "Location is too long"))]
    pub location: Option<String>,
    /// Browser label.
    #[validate(length(max = 255, message = "Browser is too long"))]
    pub browser: Option<String>,
}

impl From<CreateCustomerRequest> for CreateCustomerInput {
    fn from(req: CreateCustomerRequest) -> Self {
        Self {
            email: req.email.trim().to_string(),
            batch_no: req.batch_no.trim().to_string(),
            ip_address: req
                .ip_address
                .and_then(clear_if_blank)
                .unwrap_or_else(|| UNKNOWN_IP.to_string()),
            device: req.device.and_then(clear_if_blank),
            os: req.os.and_then(clear_if_blank),
            location: req.location.and_then(clear_if_blank),
            browser: req.browser.and_then(clear_if_blank),
        }
    }
}

/// Request body for updating a customer.
///
/// Absent fields are left alone; an empty string clears an optional field.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    /// Email.
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// Batch number.
    #[validate(length(min = 1, max = 100, message = "Batch number cannot be empty"))]
    pub batch_no: Option<String>,
    /// Client IP address.
    #[validate(length(min = 1, max = 45, message = "IP address cannot be empty"))]
    pub ip_address: Option<String>,
    /// Device label.
    #[validate(length(max = 255, message = "Device is too long"))]
    pub device: Option<String>,
    /// Operating system label.
    #[validate(length(max = 255, message = "OS is too long"))]
    pub os: Option<String>,
    /// Location label.
    #[validate(length(max = 255, message = "Location is too long"))]
    pub location: Option<String>,
    /// Browser label.
    #[validate(length(max = 255, message = "Browser is too long"))]
    pub browser: Option<String>,
}

impl From<UpdateCustomerRequest> for UpdateCustomerInput {
    fn from(req: UpdateCustomerRequest) -> Self {
        Self {
            email: req.email.map(|e| e.trim().to_string()),
            batch_no: req.batch_no,
            ip_address: req.ip_address,
            device: req.device.map(clear_if_blank),
            os: req.os.map(clear_if_blank),
            location: req.location.map(clear_if_blank),
            browser: req.browser.map(clear_if_blank),
        }
    }
}

fn repository(state: &AppState) -> CustomerRepository<'_> {
    CustomerRepository::new(&state.db)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/api/customers`
pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Vec<customers::Model>> {
    let customers = repository(&state).list().await?;
    let message = if customers.is_empty() {
        "No customers found"
    } else {
        "Customers retrieved successfully"
    };
    Ok(ApiResponse::ok(customers, message))
}

/// GET `/api/customers/{id}`
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<customers::Model> {
    let id = parse_id(&id, NOT_FOUND)?;
    let customer = repository(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::ok(customer, "Customer retrieved successfully"))
}

/// POST `/api/customers`
pub async fn create_customer(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateCustomerRequest>,
) -> ApiResult<customers::Model> {
    let customer = repository(&state).create(payload.into()).await?;
    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok(ApiResponse::created(customer, "Customer created successfully"))
}

/// PUT `/api/customers/{id}`
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateCustomerRequest>,
) -> ApiResult<customers::Model> {
    let id = parse_id(&id, NOT_FOUND)?;
    let customer = repository(&state)
        .update(id, payload.into())
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::ok(customer, "Customer updated successfully"))
}

/// DELETE `/api/customers/{id}`
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, NOT_FOUND)?;
    if !repository(&state).delete(id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    tracing::info!(customer_id = %id, "Customer deleted");
    Ok(ApiResponse::message("Customer deleted successfully"))
}
