//! # Report Reader
//!
//! Date-ranged sales reports: plain row listing, no aggregation.

use chrono::NaiveDate;

use crate::pool::Database;
use crate::service::ServiceResult;
use loja_core::ReportRow;

/// Reads recorded sales for reporting.
#[derive(Debug, Clone)]
pub struct ReportReader {
    db: Database,
}

impl ReportReader {
    /// Creates a new reader over the given database.
    pub fn new(db: Database) -> Self {
        ReportReader { db }
    }

    /// Returns every sale whose calendar date falls in the inclusive
    /// `[from, to]` range, ordered chronologically.
    ///
    /// An inverted range is not an error; it simply matches nothing.
    pub async fn sales_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ServiceResult<Vec<ReportRow>> {
        Ok(self.db.sales().sales_between(from, to).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
