//! # Sale Recorder
//!
//! The sales transaction workflow: resolve a product, compute exact
//! totals, and durably record the sale as three coordinated writes.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    record(SaleRequest)                              │
//! │                                                                     │
//! │  validate quantity, parse commission ("," or ".")                   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  BEGIN TRANSACTION                                                  │
//! │   ├── resolve product (reference first, else id)                    │
//! │   ├── totals = unit_price × qty, net = total − commission           │
//! │   ├── INSERT sales            → sale_id                             │
//! │   ├── INSERT sale_line_items  (unit price frozen at sale time)      │
//! │   └── UPDATE products SET stock = stock − qty                       │
//! │  COMMIT ── all three writes, or none at all                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SaleConfirmation { sale_id, total, commission, net }               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Floor
//! By default stock is allowed to go negative (the sale is accepted and
//! the shortfall shows up as negative stock). Constructing the recorder
//! with `RecorderConfig { allow_negative_stock: false }` turns the same
//! situation into a [`ServiceError::InsufficientStock`] failure before
//! anything is written.

use chrono::Utc;
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

use crate::pool::Database;
use crate::repository::product::PRODUCT_COLUMNS;
use crate::service::{ServiceError, ServiceResult};
use loja_core::money::{Money, SaleTotals};
use loja_core::validation;
use loja_core::{Product, SaleConfirmation, SaleRequest, ValidationError};

// =============================================================================
// Configuration
// =============================================================================

/// Behavioral knobs for the recorder.
#[derive(Debug, Clone, Copy)]
pub struct RecorderConfig {
    /// Accept sales that drive stock below zero (backorder behavior).
    pub allow_negative_stock: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        RecorderConfig {
            allow_negative_stock: true,
        }
    }
}

// =============================================================================
// Sale Recorder
// =============================================================================

/// Records sales as single atomic units of work.
#[derive(Debug, Clone)]
pub struct SaleRecorder {
    db: Database,
    config: RecorderConfig,
}

impl SaleRecorder {
    /// Creates a recorder with default behavior (negative stock allowed).
    pub fn new(db: Database) -> Self {
        SaleRecorder::with_config(db, RecorderConfig::default())
    }

    /// Creates a recorder with explicit behavior.
    pub fn with_config(db: Database, config: RecorderConfig) -> Self {
        SaleRecorder { db, config }
    }

    /// Records a sale.
    ///
    /// ## Side Effects
    /// Exactly one new sale row, exactly one new line item row, and one
    /// stock decrement - or none at all on any failure.
    ///
    /// ## Failures
    /// * [`ServiceError::ProductNotFound`] - bad reference/id, or the
    ///   product has no sale price
    /// * [`ServiceError::InvalidInput`] - non-positive quantity,
    ///   unparseable commission, or no product selector at all
    /// * [`ServiceError::InsufficientStock`] - stock floor enabled and
    ///   the quantity exceeds available stock
    /// * [`ServiceError::Store`] - the store itself failed
    pub async fn record(&self, req: &SaleRequest) -> ServiceResult<SaleConfirmation> {
        debug!(
            customer = %req.customer_name,
            channel = %req.channel,
            quantity = req.quantity,
            "Recording sale"
        );

        validation::validate_quantity(req.quantity)?;
        let commission = parse_commission(req.commission.as_deref())?;

        let mut tx = self.db.pool().begin().await?;

        let product = resolve_product(&mut tx, req).await?;

        // A product without a sale price cannot be sold; both resolution
        // paths report it the same way.
        let unit_price_cents = match product.sale_price_cents {
            Some(cents) => cents,
            None => return Err(ServiceError::ProductNotFound(product.reference)),
        };

        let totals = SaleTotals::compute(
            Money::from_cents(unit_price_cents),
            req.quantity,
            commission,
        );

        if !self.config.allow_negative_stock && product.stock - req.quantity < 0 {
            return Err(ServiceError::InsufficientStock {
                reference: product.reference,
                available: product.stock,
                requested: req.quantity,
            });
        }

        let sold_at = Utc::now();

        let sale_result = sqlx::query(
            "INSERT INTO sales \
             (customer_name, channel, total_cents, commission_cents, net_cents, sold_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&req.customer_name)
        .bind(&req.channel)
        .bind(totals.total.cents())
        .bind(totals.commission.cents())
        .bind(totals.net.cents())
        .bind(sold_at)
        .execute(&mut *tx)
        .await?;
        let sale_id = sale_result.last_insert_rowid();

        sqlx::query(
            "INSERT INTO sale_line_items (sale_id, product_id, quantity, unit_price_cents) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(sale_id)
        .bind(product.id)
        .bind(req.quantity)
        .bind(unit_price_cents)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET stock = stock - ?2, updated_at = ?3 WHERE id = ?1")
            .bind(product.id)
            .bind(req.quantity)
            .bind(sold_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            sale_id,
            product_id = product.id,
            total = %totals.total,
            net = %totals.net,
            "Sale recorded"
        );

        Ok(SaleConfirmation {
            sale_id,
            total_cents: totals.total.cents(),
            commission_cents: totals.commission.cents(),
            net_cents: totals.net.cents(),
        })
    }
}

/// Resolves the product a request is selling.
///
/// A present, non-blank reference takes precedence over an id; neither
/// being supplied is an input error. Runs on the recording transaction so
/// the resolved stock level is the one the decrement applies to.
async fn resolve_product(
    tx: &mut Transaction<'_, Sqlite>,
    req: &SaleRequest,
) -> ServiceResult<Product> {
    let reference = req
        .product_reference
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());

    if let Some(reference) = reference {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE reference = ?1"
        ))
        .bind(reference)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| ServiceError::ProductNotFound(reference.to_string()))
    } else if let Some(id) = req.product_id {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| ServiceError::ProductNotFound(id.to_string()))
    } else {
        Err(ValidationError::Required {
            field: "product reference or id".to_string(),
        }
        .into())
    }
}

/// Parses the raw commission field: blank means zero, otherwise the
/// locale-normalizing [`Money::parse`] contract applies.
fn parse_commission(input: Option<&str>) -> Result<Money, ValidationError> {
    match input.map(str::trim) {
        None | Some("") => Ok(Money::zero()),
        Some(raw) => Money::parse(raw).map_err(|e| ValidationError::InvalidFormat {
            field: "commission".to_string(),
            reason: e.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use loja_core::NewProduct;

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn add_product(db: &Database, reference: &str, price_cents: Option<i64>, stock: i64) -> i64 {
        db.products()
            .insert(&NewProduct {
                reference: reference.to_string(),
                name: format!("{reference} product"),
                category: "test".to_string(),
                cost_price_cents: 1000,
                sale_price_cents: price_cents,
                stock,
                notes: None,
            })
            .await
            .unwrap()
            .id
    }

    fn request_by_reference(reference: &str, quantity: i64, commission: Option<&str>) -> SaleRequest {
        SaleRequest {
            customer_name: "Ana".to_string(),
            channel: "marketplace".to_string(),
            commission: commission.map(str::to_string),
            product_reference: Some(reference.to_string()),
            product_id: None,
            quantity,
        }
    }

    fn request_by_id(id: i64, quantity: i64) -> SaleRequest {
        SaleRequest {
            customer_name: "Ana".to_string(),
            channel: "direct".to_string(),
            commission: None,
            product_reference: None,
            product_id: Some(id),
            quantity,
        }
    }

    async fn assert_no_side_effects(db: &Database, product_id: i64, expected_stock: i64) {
        assert_eq!(db.sales().count().await.unwrap(), 0);
        assert_eq!(db.sales().line_item_count().await.unwrap(), 0);
        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock, expected_stock);
    }

    #[tokio::test]
    async fn test_record_sale_happy_path() {
        // Product{code="SKU1", price=25.00, stock=10}; qty=3, commission="5,00"
        // → total=75.00, net=70.00, stock=7
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", Some(2500), 10).await;

        let recorder = SaleRecorder::new(db.clone());
        let confirmation = recorder
            .record(&request_by_reference("SKU1", 3, Some("5,00")))
            .await
            .unwrap();

        assert_eq!(confirmation.total_cents, 7500);
        assert_eq!(confirmation.commission_cents, 500);
        assert_eq!(confirmation.net_cents, 7000);

        let sale = db.sales().get_by_id(confirmation.sale_id).await.unwrap().unwrap();
        assert_eq!(sale.customer_name, "Ana");
        assert_eq!(sale.channel, "marketplace");
        assert_eq!(sale.total_cents, 7500);
        assert_eq!(sale.net_cents, 7000);

        let items = db.sales().items_for(confirmation.sale_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, product_id);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].unit_price_cents, 2500);

        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock, 7);

        assert_eq!(db.sales().count().await.unwrap(), 1);
        assert_eq!(db.sales().line_item_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reference_resolution_is_case_and_trim_insensitive() {
        let db = setup().await;
        let product_id = add_product(&db, "Abc1", Some(1000), 30).await;
        let recorder = SaleRecorder::new(db.clone());

        for probe in [" ABC1 ", "abc1", "Abc1"] {
            recorder.record(&request_by_reference(probe, 1, None)).await.unwrap();
        }

        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock, 27);
        assert_eq!(db.sales().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_resolution_by_id() {
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", Some(1200), 5).await;
        let recorder = SaleRecorder::new(db.clone());

        let confirmation = recorder.record(&request_by_id(product_id, 2)).await.unwrap();
        assert_eq!(confirmation.total_cents, 2400);
        assert_eq!(confirmation.commission_cents, 0);
        assert_eq!(confirmation.net_cents, 2400);
    }

    #[tokio::test]
    async fn test_reference_takes_precedence_over_id() {
        let db = setup().await;
        let a = add_product(&db, "AAA", Some(1000), 10).await;
        let b = add_product(&db, "BBB", Some(9900), 10).await;
        let recorder = SaleRecorder::new(db.clone());

        let mut req = request_by_reference("AAA", 1, None);
        req.product_id = Some(b);
        let confirmation = recorder.record(&req).await.unwrap();

        assert_eq!(confirmation.total_cents, 1000);
        let stock_a = db.products().get_by_id(a).await.unwrap().unwrap().stock;
        let stock_b = db.products().get_by_id(b).await.unwrap().unwrap().stock;
        assert_eq!(stock_a, 9);
        assert_eq!(stock_b, 10);
    }

    #[tokio::test]
    async fn test_unknown_reference_leaves_store_unchanged() {
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", Some(2500), 10).await;
        let recorder = SaleRecorder::new(db.clone());

        let err = recorder
            .record(&request_by_reference("NOPE", 3, None))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::ProductNotFound(ref r) if r == "NOPE"), "got {err:?}");
        assert_no_side_effects(&db, product_id, 10).await;
    }

    #[tokio::test]
    async fn test_unknown_id_is_product_not_found() {
        let db = setup().await;
        let recorder = SaleRecorder::new(db.clone());

        let err = recorder.record(&request_by_id(404, 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_unpriced_product_is_product_not_found() {
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", None, 10).await;
        let recorder = SaleRecorder::new(db.clone());

        let err = recorder.record(&request_by_id(product_id, 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::ProductNotFound(_)), "got {err:?}");

        let err = recorder
            .record(&request_by_reference("SKU1", 1, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ProductNotFound(_)), "got {err:?}");

        assert_no_side_effects(&db, product_id, 10).await;
    }

    #[tokio::test]
    async fn test_commission_separators_are_equivalent() {
        let db = setup().await;
        add_product(&db, "SKU1", Some(10000), 100).await;
        let recorder = SaleRecorder::new(db.clone());

        let dot = recorder
            .record(&request_by_reference("SKU1", 1, Some("10.50")))
            .await
            .unwrap();
        let comma = recorder
            .record(&request_by_reference("SKU1", 1, Some("10,50")))
            .await
            .unwrap();

        assert_eq!(dot.commission_cents, 1050);
        assert_eq!(comma.commission_cents, dot.commission_cents);
        assert_eq!(comma.net_cents, dot.net_cents);
    }

    #[tokio::test]
    async fn test_blank_commission_defaults_to_zero() {
        let db = setup().await;
        add_product(&db, "SKU1", Some(2500), 10).await;
        let recorder = SaleRecorder::new(db.clone());

        for commission in [None, Some(""), Some("   ")] {
            let confirmation = recorder
                .record(&request_by_reference("SKU1", 1, commission))
                .await
                .unwrap();
            assert_eq!(confirmation.commission_cents, 0);
            assert_eq!(confirmation.net_cents, confirmation.total_cents);
        }
    }

    #[tokio::test]
    async fn test_malformed_commission_is_invalid_input() {
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", Some(2500), 10).await;
        let recorder = SaleRecorder::new(db.clone());

        let err = recorder
            .record(&request_by_reference("SKU1", 1, Some("abc")))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)), "got {err:?}");
        assert_no_side_effects(&db, product_id, 10).await;
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_invalid_input() {
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", Some(2500), 10).await;
        let recorder = SaleRecorder::new(db.clone());

        for quantity in [0, -3] {
            let err = recorder
                .record(&request_by_reference("SKU1", quantity, None))
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(_)), "got {err:?}");
        }
        assert_no_side_effects(&db, product_id, 10).await;
    }

    #[tokio::test]
    async fn test_missing_product_selector_is_invalid_input() {
        let db = setup().await;
        let recorder = SaleRecorder::new(db.clone());

        let req = SaleRequest {
            customer_name: "Ana".to_string(),
            channel: "direct".to_string(),
            commission: None,
            product_reference: Some("   ".to_string()), // blank counts as absent
            product_id: None,
            quantity: 1,
        };
        let err = recorder.record(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_overselling_drives_stock_negative_by_default() {
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", Some(2500), 10).await;
        let recorder = SaleRecorder::new(db.clone());

        recorder.record(&request_by_reference("SKU1", 15, None)).await.unwrap();

        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock, -5);
    }

    #[tokio::test]
    async fn test_stock_floor_rejects_oversell_without_writing() {
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", Some(2500), 10).await;
        let recorder = SaleRecorder::with_config(
            db.clone(),
            RecorderConfig {
                allow_negative_stock: false,
            },
        );

        let err = recorder
            .record(&request_by_reference("SKU1", 15, None))
            .await
            .unwrap_err();

        assert!(
            matches!(
                err,
                ServiceError::InsufficientStock {
                    available: 10,
                    requested: 15,
                    ..
                }
            ),
            "got {err:?}"
        );
        assert_no_side_effects(&db, product_id, 10).await;

        // Exactly-available still goes through.
        recorder.record(&request_by_reference("SKU1", 10, None)).await.unwrap();
        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_unit_price_is_frozen_at_sale_time() {
        let db = setup().await;
        let product_id = add_product(&db, "SKU1", Some(2500), 10).await;
        let recorder = SaleRecorder::new(db.clone());

        let confirmation = recorder
            .record(&request_by_reference("SKU1", 1, None))
            .await
            .unwrap();

        // Reprice the product afterwards.
        let replacement = NewProduct {
            reference: "SKU1".to_string(),
            name: "SKU1 product".to_string(),
            category: "test".to_string(),
            cost_price_cents: 1000,
            sale_price_cents: Some(9900),
            stock: 9,
            notes: None,
        };
        db.products().update(product_id, &replacement).await.unwrap();

        let items = db.sales().items_for(confirmation.sale_id).await.unwrap();
        assert_eq!(items[0].unit_price_cents, 2500);

        let sale = db.sales().get_by_id(confirmation.sale_id).await.unwrap().unwrap();
        assert_eq!(sale.total_cents, 2500);
    }

    #[tokio::test]
    async fn test_customer_and_channel_pass_through_unvalidated() {
        let db = setup().await;
        add_product(&db, "SKU1", Some(100), 10).await;
        let recorder = SaleRecorder::new(db.clone());

        let mut req = request_by_reference("SKU1", 1, None);
        req.customer_name = String::new();
        req.channel = String::new();

        let confirmation = recorder.record(&req).await.unwrap();
        let sale = db.sales().get_by_id(confirmation.sale_id).await.unwrap().unwrap();
        assert_eq!(sale.customer_name, "");
        assert_eq!(sale.channel, "");
    }
}
