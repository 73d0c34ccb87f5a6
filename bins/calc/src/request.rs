//! JSON input accepted by the calculator.

use chrono::NaiveDate;
use folio_core::CalcContext;
use folio_core::adjustment::{Adjustment, AdjustmentCatalog, AdjustmentError};
use folio_core::document::Document;
use folio_shared::types::{CompanyId, UserId};
use serde::Deserialize;

/// A document together with everything needed to total it.
#[derive(Debug, Clone, Deserialize)]
pub struct CalcRequest {
    /// Owning company. Generated when omitted.
    #[serde(default)]
    pub company_id: CompanyId,
    /// Acting user, stamped on committed transactions.
    #[serde(default)]
    pub user_id: UserId,
    /// Date used for adjustment validity and posting.
    pub as_of: NaiveDate,
    /// Taxes and discounts referenced by the document's lines.
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    /// The invoice or bill.
    pub document: Document,
}

impl CalcRequest {
    /// Parses a request from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Company, user and date for the calculation.
    pub fn context(&self) -> CalcContext {
        CalcContext::new(self.company_id, self.user_id, self.as_of)
    }

    /// Catalog of the request's adjustments.
    pub fn catalog(&self) -> Result<AdjustmentCatalog, AdjustmentError> {
        AdjustmentCatalog::from_adjustments(self.adjustments.iter().cloned())
    }
}
