//! Core business logic for Folio.
//!
//! This crate contains pure business logic with ZERO I/O dependencies.
//! All amounts are integer minor units; rates are exact decimals.
//!
//! # Modules
//!
//! - `currency` - Currency table, conversion and amount allocation
//! - `adjustment` - Taxes and discounts, and how their rates apply
//! - `document` - Invoice and bill totals, line diffs, journal posting
//! - `ledger` - Double-entry bookkeeping and the balance invariant
//! - `context` - Explicit company / user / date context

pub mod adjustment;
pub mod context;
pub mod currency;
pub mod document;
pub mod ledger;

pub use context::CalcContext;
