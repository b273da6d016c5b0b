//! # Sale Repository
//!
//! Read-side database operations for sales and their line items.
//!
//! Sales are written exactly once, by the
//! [`crate::service::recorder::SaleRecorder`] transaction; this repository
//! only ever reads them back.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use loja_core::{ReportRow, Sale, SaleLineItem};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, customer_name, channel, total_cents, commission_cents, net_cents, sold_at \
             FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all line items for a sale.
    pub async fn items_for(&self, sale_id: i64) -> DbResult<Vec<SaleLineItem>> {
        let items = sqlx::query_as::<_, SaleLineItem>(
            "SELECT id, sale_id, product_id, quantity, unit_price_cents \
             FROM sale_line_items WHERE sale_id = ?1 ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Returns report rows for all sales whose calendar date falls inside
    /// the inclusive `[from, to]` range, ordered chronologically.
    pub async fn sales_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<ReportRow>> {
        debug!(from = %from, to = %to, "Loading sales report rows");

        let rows = sqlx::query_as::<_, ReportRow>(
            "SELECT sold_at, channel, total_cents, commission_cents, net_cents \
             FROM sales \
             WHERE date(sold_at) BETWEEN date(?1) AND date(?2) \
             ORDER BY sold_at, id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts sale line items (for diagnostics).
    pub async fn line_item_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_line_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
