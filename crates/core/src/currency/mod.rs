//! Multi-currency handling: the currency table, conversion and allocation.

pub mod allocation;
pub mod conversion;
pub mod error;
pub mod table;

#[cfg(test)]
mod conversion_props;

pub use allocation::AllocationUtil;
pub use conversion::CurrencyConverter;
pub use error::CurrencyError;
pub use table::{CurrencyInfo, CurrencyTable, MAX_PRECISION};
