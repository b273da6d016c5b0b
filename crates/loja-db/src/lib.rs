//! # loja-db: Storage Layer for Loja
//!
//! This crate provides database access and the caller-facing services for
//! loja. It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Loja Data Flow                               │
//! │                                                                     │
//! │  Web / templating layer (external consumer)                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                     loja-db (THIS CRATE)                      │  │
//! │  │                                                               │  │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌──────────────┐     │  │
//! │  │   │   Services   │   │  Repositories │   │  Migrations  │     │  │
//! │  │   │ SaleRecorder │──►│ ProductRepo   │   │  (embedded)  │     │  │
//! │  │   │ Directory    │   │ SaleRepo      │   │ 001_init.sql │     │  │
//! │  │   │ ReportReader │   │               │   │              │     │  │
//! │  │   └──────────────┘   └───────┬───────┘   └──────────────┘     │  │
//! │  │                             │                                 │  │
//! │  └─────────────────────────────┼─────────────────────────────────┘  │
//! │                                ▼                                    │
//! │                        SQLite Database                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, sale)
//! - [`service`] - Sale Recorder, Product Directory, Report Reader
//!
//! ## Usage
//!
//! ```rust,ignore
//! use loja_db::{Database, DbConfig};
//! use loja_db::service::SaleRecorder;
//!
//! let db = Database::new(DbConfig::from_env()).await?;
//! let recorder = SaleRecorder::new(db.clone());
//! let confirmation = recorder.record(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;

// Service re-exports for convenience
pub use service::{
    ProductDirectory, RecorderConfig, ReportReader, SaleRecorder, ServiceError, ServiceResult,
};
