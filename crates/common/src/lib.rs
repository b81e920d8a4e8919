//! Shared utilities, configuration, and error handling for the XSS Lab API
//!
//! This crate provides common functionality used across the API:
//! - Configuration loaded once at process start
//! - Error types and the uniform JSON envelope
//! - Declarative input validation
//! - Credential hashing

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod response;
pub mod validation;

pub use config::{AppConfig, SameSitePolicy};
pub use crypto::{hash_password, verify_password};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Pagination, QueryParams, ValidatedJson};
pub use response::Envelope;
pub use validation::{Validate, ValidationResult};
