//! Taxes and discounts.
//!
//! An [`Adjustment`] is either a percentage (a [`ScaledRate`] with four
//! implied decimals) or a fixed amount of minor units. Amounts are produced
//! by [`RateCalculator`] and documents reference adjustments through an
//! [`AdjustmentCatalog`].

mod catalog;
mod error;
mod rate;
mod types;

#[cfg(test)]
mod rate_props;

pub use catalog::AdjustmentCatalog;
pub use error::AdjustmentError;
pub use rate::RateCalculator;
pub use types::{
    Adjustment, AdjustmentCategory, AdjustmentRate, AdjustmentScope, Computation, FixedAmount,
    ScaledRate,
};
