//! Invoices, bills and their totals.
//!
//! - Line items and the line-collection diff
//! - Totals computation with per-line or per-document discounts
//! - Journal posting of computed totals

pub mod diff;
pub mod error;
pub mod line_item;
pub mod posting;
pub mod totals;
pub mod types;

#[cfg(test)]
mod totals_props;

pub use diff::{LineDiff, LineSync};
pub use error::DocumentError;
pub use line_item::LineItem;
pub use posting::{DocumentPosting, PostingAccounts};
pub use totals::DocumentTotalsCalculator;
pub use types::{DiscountMethod, DiscountPolicy, Document, DocumentKind, LineTotals, Totals};
