//! `SeaORM` entity definitions.

pub mod customers;
pub mod products;

pub mod prelude {
    //! Entity re-exports.
    pub use super::customers::Entity as Customers;
    pub use super::products::Entity as Products;
}
