//! # loja-core: Pure Business Logic for Loja
//!
//! This crate is the **heart** of loja, a small inventory-and-sales backend
//! for a single retailer. It contains all business logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Loja Architecture                            │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │            Web / templating layer (external consumer)         │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │               ★ loja-core (THIS CRATE) ★                      │  │
//! │  │                                                               │  │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                │  │
//! │  │   │   types   │  │   money   │  │ validation │                │  │
//! │  │   │  Product  │  │   Money   │  │   rules    │                │  │
//! │  │   │   Sale    │  │ SaleTotals│  │   checks   │                │  │
//! │  │   └───────────┘  └───────────┘  └────────────┘                │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                    loja-db (Storage Layer)                    │  │
//! │  │        SQLite queries, migrations, repositories, services     │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleLineItem, requests/results)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use loja_core::money::{Money, SaleTotals};
//!
//! // Parse an operator-typed commission, either decimal separator
//! let commission = Money::parse("5,00").unwrap();
//!
//! // Exact totals: 3 × 25.00 − 5.00 = 70.00 net
//! let totals = SaleTotals::compute(Money::from_cents(2500), 3, commission);
//! assert_eq!(totals.net.cents(), 7000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use loja_core::Money` instead of
// `use loja_core::money::Money`

pub use error::{ValidationError, ValidationResult};
pub use money::{Money, ParseMoneyError, SaleTotals};
pub use types::*;
