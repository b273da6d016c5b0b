//! # Product Directory
//!
//! Administrative product operations: listing, filtered search, create,
//! full-replace update, delete, and the reference lookup the sale-entry
//! form uses to pre-populate quantity and price.
//!
//! Thin by design - the interesting invariants live in the
//! [`crate::service::recorder`]; this service validates input shape and
//! translates storage failures into the caller-facing taxonomy.

use tracing::info;

use crate::error::DbError;
use crate::pool::Database;
use crate::service::{ServiceError, ServiceResult};
use loja_core::validation;
use loja_core::{NewProduct, Product, ProductLookup};

/// Product CRUD and lookup, backed by [`crate::ProductRepository`].
#[derive(Debug, Clone)]
pub struct ProductDirectory {
    db: Database,
}

impl ProductDirectory {
    /// Creates a new directory over the given database.
    pub fn new(db: Database) -> Self {
        ProductDirectory { db }
    }

    /// Lists all products, ordered by name then id.
    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.db.products().list().await?)
    }

    /// Searches by reference-code and/or category substring,
    /// case-insensitively. Blank filters match everything.
    pub async fn search(
        &self,
        reference: Option<&str>,
        category: Option<&str>,
    ) -> ServiceResult<Vec<Product>> {
        let reference = reference.map(str::trim).filter(|r| !r.is_empty());
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        Ok(self.db.products().search(reference, category).await?)
    }

    /// Gets a product by id.
    pub async fn get(&self, id: i64) -> ServiceResult<Product> {
        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(id.to_string()))
    }

    /// Creates a product.
    ///
    /// ## Failures
    /// * [`ServiceError::InvalidInput`] - blank reference/name, negative price
    /// * [`ServiceError::Store`] with
    ///   [`DbError::UniqueViolation`] - reference already taken
    ///   (case-insensitively)
    pub async fn create(&self, product: &NewProduct) -> ServiceResult<Product> {
        let validated = validate_product(product)?;
        let stored = self.db.products().insert(&validated).await?;
        info!(id = stored.id, reference = %stored.reference, "Product created");
        Ok(stored)
    }

    /// Replaces every field of an existing product.
    pub async fn update(&self, id: i64, product: &NewProduct) -> ServiceResult<()> {
        let validated = validate_product(product)?;
        self.db.products().update(id, &validated).await?;
        info!(id, "Product updated");
        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## Failures
    /// * [`ServiceError::ProductInUse`] - the product appears on recorded
    ///   sale line items; the row is left untouched
    /// * [`ServiceError::ProductNotFound`] - no such product
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        match self.db.products().delete(id).await {
            Ok(()) => {
                info!(id, "Product deleted");
                Ok(())
            }
            Err(DbError::ForeignKeyViolation { .. }) => Err(ServiceError::ProductInUse(id)),
            Err(DbError::NotFound { .. }) => Err(ServiceError::ProductNotFound(id.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolves pre-population data for a reference code typed into the
    /// sale-entry form. `None` means the reference is unknown.
    pub async fn lookup(&self, reference: &str) -> ServiceResult<Option<ProductLookup>> {
        Ok(self.db.products().lookup(reference).await?)
    }
}

/// Validates and canonicalizes the writable product fields.
fn validate_product(product: &NewProduct) -> Result<NewProduct, ServiceError> {
    let reference = validation::validate_reference(&product.reference)?;
    validation::validate_product_name(&product.name)?;
    validation::validate_price_cents(product.cost_price_cents)?;
    if let Some(sale_price) = product.sale_price_cents {
        validation::validate_price_cents(sale_price)?;
    }

    Ok(NewProduct {
        reference,
        ..product.clone()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
