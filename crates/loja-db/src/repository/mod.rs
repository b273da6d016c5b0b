//! # Repository Module
//!
//! Database repository implementations for loja.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  Service (SaleRecorder / ProductDirectory / ReportReader)           │
//! │       │                                                             │
//! │       │  db.products().get_by_reference("sku1")                     │
//! │       ▼                                                             │
//! │  ProductRepository / SaleRepository                                 │
//! │       │                                                             │
//! │       │  SQL Query (runtime sqlx API, FromRow mapping)              │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • SQL is isolated in one place                                     │
//! │  • Clean separation of concerns                                     │
//! │  • Services stay focused on the business workflow                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sale-recording transaction is the one place that bypasses the
//! repositories: its three writes must share a single transaction, so
//! [`crate::service::recorder::SaleRecorder`] runs them on one
//! `sqlx::Transaction` directly.

pub mod product;
pub mod sale;
