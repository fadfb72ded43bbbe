//! Customer repository for database operations.
//!
//! Customers are form submissions. Public submissions may repeat an email;
//! staff-created and staff-edited rows must not collide with an existing one.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::customers;

/// Input for recording a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerInput {
    /// Submitted email.
    pub email: String,
    /// Batch number the customer asked about.
    pub batch_no: String,
    /// Client IP address.
    pub ip_address: String,
    /// Device label.
    pub device: Option<String>,
    /// Operating system label.
    pub os: Option<String>,
    /// Location label.
    pub location: Option<String>,
    /// Browser label.
    pub browser: Option<String>,
}

/// Input for updating a customer. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerInput {
    /// Email.
    pub email: Option<String>,
    /// Batch number.
    pub batch_no: Option<String>,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// Device; `Some(None)` clears it.
    pub device: Option<Option<String>>,
    /// Operating system; `Some(None)` clears it.
    pub os: Option<Option<String>>,
    /// Location; `Some(None)` clears it.
    pub location: Option<Option<String>>,
    /// Browser; `Some(None)` clears it.
    pub browser: Option<Option<String>>,
}

/// Customer repository for CRUD operations.
#[derive(Debug, Clone, Copy)]
pub struct CustomerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CustomerRepository<'a> {
    /// Creates a customer repository over a borrowed connection.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<customers::Model>, DbErr> {
        customers::Entity::find()
            .order_by_desc(customers::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Finds a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<customers::Model>, DbErr> {
        customers::Entity::find_by_id(id).one(self.db).await
    }

    /// Finds a customer by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<customers::Model>, DbErr> {
        customers::Entity::find()
            .filter(customers::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Records a submission. Repeated emails are allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn record_submission(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customers::Model, DbErr> {
        let now = chrono::Utc::now().into();

        let customer = customers::ActiveModel {
            id: Set(Uuid::now_v7()),
            email: Set(input.email),
            batch_no: Set(input.batch_no),
            ip_address: Set(input.ip_address),
            device: Set(input.device),
            os: Set(input.os),
            location: Set(input.location),
            browser: Set(input.browser),
            submitted_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
        };

        customer.insert(self.db).await
    }

    /// Creates a customer with an email no other customer uses.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` if the email is taken, or a database error.
    pub async fn create(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customers::Model, RepositoryError> {
        if self.find_by_email(&input.email).await?.is_some() {
            return Err(RepositoryError::DuplicateEmail(input.email));
        }

        Ok(self.record_submission(input).await?)
    }

    /// Applies a partial update. Returns `None` if the customer does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` if the new email belongs to another customer,
    /// or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCustomerInput,
    ) -> Result<Option<customers::Model>, RepositoryError> {
        if let Some(email) = &input.email
            && let Some(other) = self.find_by_email(email).await?
            && other.id != id
        {
            return Err(RepositoryError::DuplicateEmail(email.clone()));
        }

        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut customer = existing.into_active_model();
        if let Some(email) = input.email {
            customer.email = Set(email);
        }
        if let Some(batch_no) = input.batch_no {
            customer.batch_no = Set(batch_no);
        }
        if let Some(ip_address) = input.ip_address {
            customer.ip_address = Set(ip_address);
        }
        if let Some(device) = input.device {
            customer.device = Set(device);
        }
        if let Some(os) = input.os {
            customer.os = Set(os);
        }
        if let Some(location) = input.location {
            customer.location = Set(location);
        }
        if let Some(browser) = input.browser {
            customer.browser = Set(browser);
        }
        customer.updated_at = Set(chrono::Utc::now().into());

        Ok(Some(customer.update(self.db).await?))
    }

    /// Deletes a customer. Returns `false` if nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = customers::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
