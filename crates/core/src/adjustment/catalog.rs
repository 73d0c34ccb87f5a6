//! Lookup of adjustments by id.

use std::collections::HashMap;

use folio_shared::types::AdjustmentId;

use super::error::AdjustmentError;
use super::types::{Adjustment, AdjustmentCategory};

/// The set of adjustments a document may reference.
///
/// Every entry is validated on insert, so anything resolved from the
/// catalog is safe to compute with.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentCatalog {
    entries: HashMap<AdjustmentId, Adjustment>,
}

impl AdjustmentCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list, rejecting invalid entries.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    pub fn from_adjustments(
        adjustments: impl IntoIterator<Item = Adjustment>,
    ) -> Result<Self, AdjustmentError> {
        let mut catalog = Self::new();
        for adjustment in adjustments {
            catalog.insert(adjustment)?;
        }
        Ok(catalog)
    }

    /// Adds or replaces an adjustment, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWindow` if the validity window is inverted.
    pub fn insert(&mut self, adjustment: Adjustment) -> Result<Option<Adjustment>, AdjustmentError> {
        adjustment.validate()?;
        Ok(self.entries.insert(adjustment.id, adjustment))
    }

    /// Looks up an adjustment.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAdjustment` if the id is not in the catalog.
    pub fn get(&self, id: AdjustmentId) -> Result<&Adjustment, AdjustmentError> {
        self.entries
            .get(&id)
            .ok_or(AdjustmentError::UnknownAdjustment(id))
    }

    /// Resolves ids that must all belong to `expected`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAdjustment` or `CategoryMismatch` for the first bad id.
    pub fn resolve(
        &self,
        ids: &[AdjustmentId],
        expected: AdjustmentCategory,
    ) -> Result<Vec<&Adjustment>, AdjustmentError> {
        ids.iter()
            .map(|id| {
                let adjustment = self.get(*id)?;
                if adjustment.category != expected {
                    return Err(AdjustmentError::CategoryMismatch {
                        id: *id,
                        expected,
                        actual: adjustment.category,
                    });
                }
                Ok(adjustment)
            })
            .collect()
    }

    /// Number of adjustments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no adjustments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
