//! Shared errors, configuration and authentication types for Amaramba.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT claims, roles and token validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;


pub use auth::{Claims, Role};
pub use config::{AppConfig, StorageSettings};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
