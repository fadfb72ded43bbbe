//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod customer;
pub mod error;
pub mod product;

pub use customer::{CreateCustomerInput, CustomerRepository, UpdateCustomerInput};
pub use error::RepositoryError;
pub use product::{CreateProductInput, ProductRepository, UpdateProductInput};
