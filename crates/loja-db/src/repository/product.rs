//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Listing and case-insensitive substring search
//! - Reference-code lookup (trimmed, case-insensitive via NOCASE collation)
//! - CRUD with referential-integrity-aware delete

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use loja_core::{NewProduct, Product, ProductLookup};

/// Column list shared by every query that hydrates a full [`Product`].
pub(crate) const PRODUCT_COLUMNS: &str = "id, reference, name, category, cost_price_cents, \
     sale_price_cents, stock, notes, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Reference lookup at sale entry
/// let product = repo.get_by_reference(" abc1 ").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, ordered by name then id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name COLLATE NOCASE, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Searches products by reference-code and/or category substring.
    ///
    /// Both filters are case-insensitive and optional; an absent filter
    /// matches everything.
    pub async fn search(
        &self,
        reference: Option<&str>,
        category: Option<&str>,
    ) -> DbResult<Vec<Product>> {
        debug!(reference = ?reference, category = ?category, "Searching products");

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE (?1 IS NULL OR reference LIKE '%' || ?1 || '%') \
               AND (?2 IS NULL OR category LIKE '%' || ?2 || '%') \
             ORDER BY name COLLATE NOCASE, id"
        ))
        .bind(reference.map(str::trim))
        .bind(category.map(str::trim))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its reference code.
    ///
    /// The probe is trimmed here; case-insensitivity comes from the
    /// column's NOCASE collation, so `" ABC1 "`, `"abc1"` and `"Abc1"`
    /// all resolve to the same product.
    pub async fn get_by_reference(&self, reference: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE reference = ?1"
        ))
        .bind(reference.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Resolves the pre-population data for the sale-entry form.
    ///
    /// ## Returns
    /// * `Ok(Some(ProductLookup))` - reference known
    /// * `Ok(None)` - no such reference
    pub async fn lookup(&self, reference: &str) -> DbResult<Option<ProductLookup>> {
        let row = sqlx::query_as::<_, ProductLookup>(
            "SELECT id, name, sale_price_cents, stock FROM products WHERE reference = ?1",
        )
        .bind(reference.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored row, with its generated id
    /// * `Err(DbError::UniqueViolation)` - reference already exists
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(reference = %product.reference, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO products \
             (reference, name, category, cost_price_cents, sale_price_cents, stock, notes, \
              created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        )
        .bind(&product.reference)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.cost_price_cents)
        .bind(product.sale_price_cents)
        .bind(product.stock)
        .bind(&product.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Updates an existing product (full field replace).
    ///
    /// ## Returns
    /// * `Ok(())` - update successful
    /// * `Err(DbError::NotFound)` - product doesn't exist
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<()> {
        debug!(id = %id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET \
                reference = ?2, \
                name = ?3, \
                category = ?4, \
                cost_price_cents = ?5, \
                sale_price_cents = ?6, \
                stock = ?7, \
                notes = ?8, \
                updated_at = ?9 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&product.reference)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.cost_price_cents)
        .bind(product.sale_price_cents)
        .bind(product.stock)
        .bind(&product.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - row removed
    /// * `Err(DbError::NotFound)` - product doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - referenced by sale line items
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
