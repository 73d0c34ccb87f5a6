//! Shared types and configuration for Folio.
//!
//! This crate provides common types used across all other crates:
//! - Money as integer minor units bound to a currency code
//! - Typed IDs for type-safe entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{CurrencyCode, Money, MoneyError};
