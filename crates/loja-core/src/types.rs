//! # Domain Types
//!
//! Core domain types used throughout loja.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐  │
//! │  │    Product      │   │      Sale       │   │   SaleLineItem   │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────  │  │
//! │  │  id             │   │  id             │   │  id              │  │
//! │  │  reference      │   │  customer_name  │   │  sale_id (FK)    │  │
//! │  │  sale_price     │   │  channel        │   │  product_id (FK) │  │
//! │  │  stock          │   │  total/net      │   │  unit_price      │  │
//! │  └─────────────────┘   └─────────────────┘   └──────────────────┘  │
//! │                                                                     │
//! │  Sale 1 ──── * SaleLineItem * ──── 1 Product                        │
//! │  (this workflow writes exactly one line item per sale)              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Products have:
//! - `id`: database-generated integer - immutable, used for relations
//! - `reference`: human-assigned code - used for fast lookup at sale entry,
//!   matched case-insensitively

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Database-generated identifier.
    pub id: i64,

    /// Human-assigned reference code, unique case-insensitively.
    pub reference: String,

    /// Display name.
    pub name: String,

    /// Free-text category used for filtered search.
    pub category: String,

    /// Acquisition cost in cents.
    pub cost_price_cents: i64,

    /// Selling price in cents. Absent when the product is not priced yet;
    /// such products cannot be sold.
    pub sale_price_cents: Option<i64>,

    /// Current stock level. No floor is enforced; overselling drives this
    /// negative.
    pub stock: i64,

    /// Free-text notes.
    pub notes: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as Money, when priced.
    #[inline]
    pub fn sale_price(&self) -> Option<Money> {
        self.sale_price_cents.map(Money::from_cents)
    }

    /// Returns the acquisition cost as Money.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_cents(self.cost_price_cents)
    }
}

/// Fields for creating a product, or fully replacing one on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub reference: String,
    pub name: String,
    pub category: String,
    pub cost_price_cents: i64,
    pub sale_price_cents: Option<i64>,
    pub stock: i64,
    pub notes: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Written exactly once; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub customer_name: String,
    /// Sales outlet/marketplace the sale went through.
    pub channel: String,
    /// Gross total in cents (sum of line totals).
    pub total_cents: i64,
    /// Commission withheld by the channel, in cents.
    pub commission_cents: i64,
    /// Net proceeds in cents: total − commission.
    pub net_cents: i64,
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn commission(&self) -> Money {
        Money::from_cents(self.commission_cents)
    }

    #[inline]
    pub fn net(&self) -> Money {
        Money::from_cents(self.net_cents)
    }
}

// =============================================================================
// Sale Line Item
// =============================================================================

/// A line item in a sale.
/// The unit price is a snapshot taken at time of sale, so later product
/// price changes do not retroactively alter past sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLineItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    /// Quantity sold (positive).
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
}

impl SaleLineItem {
    /// Returns the unit price snapshot as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Sale Recording Request / Confirmation
// =============================================================================

/// A sale-submission request, as received from the (excluded) form layer.
///
/// Exactly one of `product_reference` / `product_id` must identify the
/// product; a present, non-blank reference takes precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    /// Passed through as-is; the workflow does not validate these.
    pub customer_name: String,
    pub channel: String,

    /// Raw commission input. `None` or blank means zero. Accepts either
    /// `.` or `,` as decimal separator (see [`Money::parse`]).
    pub commission: Option<String>,

    /// Reference-code lookup, case-insensitive and trim-insensitive.
    pub product_reference: Option<String>,

    /// Identifier lookup, used when no reference is given.
    pub product_id: Option<i64>,

    /// Units sold. Must be positive; not clamped against available stock.
    pub quantity: i64,
}

/// Confirmation returned after a sale is durably recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleConfirmation {
    pub sale_id: i64,
    pub total_cents: i64,
    pub commission_cents: i64,
    pub net_cents: i64,
}

impl SaleConfirmation {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn net(&self) -> Money {
        Money::from_cents(self.net_cents)
    }
}

// =============================================================================
// Auxiliary Lookup / Report Projections
// =============================================================================

/// Pre-population data for the sale-entry form: resolved by reference code
/// before submission. A missing product is expressed as `Option::None` by
/// the lookup operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductLookup {
    pub id: i64,
    pub name: String,
    pub sale_price_cents: Option<i64>,
    pub stock: i64,
}

/// One row of the date-ranged sales report, ordered chronologically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ReportRow {
    pub sold_at: DateTime<Utc>,
    pub channel: String,
    pub total_cents: i64,
    pub commission_cents: i64,
    pub net_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sale_price_cents: Option<i64>) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            reference: "SKU1".to_string(),
            name: "Widget".to_string(),
            category: "misc".to_string(),
            cost_price_cents: 1000,
            sale_price_cents,
            stock: 10,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_product_price_accessors() {
        assert_eq!(product(Some(2500)).sale_price(), Some(Money::from_cents(2500)));
        assert_eq!(product(None).sale_price(), None);
        assert_eq!(product(None).cost_price().cents(), 1000);
    }

    #[test]
    fn test_sale_money_accessors() {
        let sale = Sale {
            id: 7,
            customer_name: "Ana".to_string(),
            channel: "marketplace".to_string(),
            total_cents: 7500,
            commission_cents: 500,
            net_cents: 7000,
            sold_at: Utc::now(),
        };
        assert_eq!(sale.total().cents(), 7500);
        assert_eq!(sale.net(), sale.total() - sale.commission());
    }
}
