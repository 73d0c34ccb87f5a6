//! Explicit calculation context.

use chrono::NaiveDate;
use folio_shared::types::{CompanyId, UserId};
use serde::{Deserialize, Serialize};

/// Who is calculating, for which company, and as of which day.
///
/// Passed into every operation that needs it instead of being read from
/// process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcContext {
    /// Company whose books are affected.
    pub company_id: CompanyId,
    /// User performing the operation.
    pub user_id: UserId,
    /// Business date. Selects active adjustments and stamps commits.
    pub as_of: NaiveDate,
}

impl CalcContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(company_id: CompanyId, user_id: UserId, as_of: NaiveDate) -> Self {
        Self {
            company_id,
            user_id,
            as_of,
        }
    }
}
