//! Core business logic for Amaramba.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `storage` - Object store abstraction with S3 and OpenDAL backends
//! - `upload` - File upload validation, key generation and storage
//! - `submission` - Client details recorded with public form submissions

pub mod storage;
pub mod submission;
pub mod upload;
