//! # Service Module
//!
//! The three caller-facing components of the backend:
//!
//! - [`SaleRecorder`] - records a sale as one atomic unit of work
//! - [`ProductDirectory`] - product CRUD, search and reference lookup
//! - [`ReportReader`] - date-ranged sales reports
//!
//! Each service is constructed with a [`crate::Database`] handle; nothing
//! here reaches for ambient global state. Failures surface as a
//! [`ServiceError`] plus a human-readable message; the caller (the excluded
//! view layer) is responsible for re-prompting the user - services never
//! retry silently.

use thiserror::Error;

use crate::error::DbError;
use loja_core::ValidationError;

pub mod directory;
pub mod recorder;
pub mod report;

pub use directory::ProductDirectory;
pub use recorder::{RecorderConfig, SaleRecorder};
pub use report::ReportReader;

// =============================================================================
// Service Error
// =============================================================================

/// Caller-facing failure taxonomy.
///
/// ## Atomicity
/// Every failure out of [`SaleRecorder::record`] leaves the store
/// unchanged: the sale header, line item and stock decrement either all
/// commit or none do.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Unknown reference/id, or the product has no sale price.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Malformed or missing input field.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Delete blocked by referential integrity: the product appears on
    /// recorded sale line items.
    #[error("product {0} is referenced by recorded sales")]
    ProductInUse(i64),

    /// The stock floor is enabled and the sale would drive stock negative.
    #[error("insufficient stock for {reference}: available {available}, requested {requested}")]
    InsufficientStock {
        reference: String,
        available: i64,
        requested: i64,
    },

    /// Transport/store-level failure.
    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Store(DbError::from(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
