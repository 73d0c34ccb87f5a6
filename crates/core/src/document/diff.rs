//! Identity-keyed comparison of line collections.

use std::collections::HashSet;

use folio_shared::types::LineItemId;
use serde::{Deserialize, Serialize};

use super::line_item::LineItem;

/// Result of comparing an old and a new line collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    /// In old, absent from new. In old order.
    pub removed: Vec<LineItemId>,
    /// In new, absent from old. In new order.
    pub added: Vec<LineItemId>,
    /// In both. In new order.
    pub retained: Vec<LineItemId>,
}

impl LineDiff {
    /// Returns true if no line was added or removed.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Diffs line collections by id, ignoring position.
pub struct LineSync;

impl LineSync {
    /// Compares `old` and `new` by line identity.
    ///
    /// Reordering alone yields no removals and no additions.
    #[must_use]
    pub fn diff(old: &[LineItem], new: &[LineItem]) -> LineDiff {
        let old_ids: HashSet<LineItemId> = old.iter().map(|l| l.id).collect();
        let new_ids: HashSet<LineItemId> = new.iter().map(|l| l.id).collect();

        let removed = old
            .iter()
            .map(|l| l.id)
            .filter(|id| !new_ids.contains(id))
            .collect();
        let (retained, added) = new
            .iter()
            .map(|l| l.id)
            .partition(|id| old_ids.contains(id));

        LineDiff {
            removed,
            added,
            retained,
        }
    }
}
