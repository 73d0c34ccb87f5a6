//! Adjustment domain types: taxes and discounts.
//!
//! Rates are never floating point. A percentage is a [`ScaledRate`], an
//! integer with four implied decimal places, so `12.345%` is stored as
//! `123_450`. A fixed adjustment is an amount of minor units.

use chrono::NaiveDate;
use folio_shared::types::AdjustmentId;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::error::AdjustmentError;

/// Whether an adjustment adds to or subtracts from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentCategory {
    /// Added on top of the subtotal.
    Tax,
    /// Subtracted from the subtotal.
    Discount,
}

impl std::fmt::Display for AdjustmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tax => f.write_str("tax"),
            Self::Discount => f.write_str("discount"),
        }
    }
}

/// How an adjustment's rate is turned into an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Computation {
    /// A percentage of the base amount.
    Percentage,
    /// A fixed amount of minor units, independent of the base.
    Fixed,
}

/// Item kind an adjustment is meant for. Informational only; which
/// adjustments apply to which line is decided by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentScope {
    /// Goods.
    Product,
    /// Services.
    Service,
    /// Not restricted.
    #[default]
    #[serde(rename = "none")]
    Unscoped,
}

/// A percentage stored as an integer with [`ScaledRate::DECIMALS`] implied decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ScaledRate(i64);

impl ScaledRate {
    /// Number of implied decimal places.
    pub const DECIMALS: u32 = 4;
    /// Fixed-point denominator (`10^DECIMALS`).
    pub const SCALE: i64 = 10_000;
    /// The raw value of 100%.
    pub const HUNDRED_PERCENT: i64 = 100 * Self::SCALE;

    /// Builds a rate from its raw scaled value (`123_450` is 12.345%).
    pub fn from_scaled(raw: i64) -> Result<Self, AdjustmentError> {
        if (0..=Self::HUNDRED_PERCENT).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(AdjustmentError::InvalidRate(format!(
                "percentage {} is outside [0, 100]",
                Decimal::new(raw, Self::DECIMALS)
            )))
        }
    }

    /// Builds a rate from a decimal percentage (`dec!(12.345)` is 12.345%).
    ///
    /// Rejects values outside `[0, 100]` and values with more than four
    /// decimal places, since those cannot be stored without loss.
    pub fn from_percent(percent: Decimal) -> Result<Self, AdjustmentError> {
        let normalized = percent.normalize();
        if normalized.scale() > Self::DECIMALS {
            return Err(AdjustmentError::InvalidRate(format!(
                "percentage {percent} has more than {} decimal places",
                Self::DECIMALS
            )));
        }
        let raw = (normalized * Decimal::from(Self::SCALE))
            .to_i64()
            .ok_or_else(|| AdjustmentError::InvalidRate(format!("percentage {percent} is out of range")))?;
        Self::from_scaled(raw)
    }

    /// The raw scaled integer.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// The rate as a decimal percentage.
    #[must_use]
    pub fn as_percent(self) -> Decimal {
        Decimal::new(self.0, Self::DECIMALS)
    }
}

impl TryFrom<Decimal> for ScaledRate {
    type Error = AdjustmentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_percent(value)
    }
}

impl From<ScaledRate> for Decimal {
    fn from(rate: ScaledRate) -> Self {
        rate.as_percent()
    }
}

impl std::fmt::Display for ScaledRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.as_percent().normalize())
    }
}

/// A non-negative fixed amount in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct FixedAmount(i64);

impl FixedAmount {
    /// Builds a fixed amount, rejecting negative values.
    pub fn new(cents: i64) -> Result<Self, AdjustmentError> {
        if cents < 0 {
            return Err(AdjustmentError::InvalidRate(format!(
                "fixed amount {cents} must not be negative"
            )));
        }
        Ok(Self(cents))
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for FixedAmount {
    type Error = AdjustmentError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FixedAmount> for i64 {
    fn from(amount: FixedAmount) -> Self {
        amount.0
    }
}

/// Computation kind together with its rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "computation", content = "rate", rename_all = "lowercase")]
pub enum AdjustmentRate {
    /// Percentage of the base.
    Percentage(ScaledRate),
    /// Fixed minor units.
    Fixed(FixedAmount),
}

impl AdjustmentRate {
    /// Percentage rate from a decimal percent.
    pub fn percentage(percent: Decimal) -> Result<Self, AdjustmentError> {
        ScaledRate::from_percent(percent).map(Self::Percentage)
    }

    /// Fixed rate in minor units.
    pub fn fixed(cents: i64) -> Result<Self, AdjustmentError> {
        FixedAmount::new(cents).map(Self::Fixed)
    }

    /// The computation kind.
    #[must_use]
    pub const fn computation(&self) -> Computation {
        match self {
            Self::Percentage(_) => Computation::Percentage,
            Self::Fixed(_) => Computation::Fixed,
        }
    }
}

/// A named tax or discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Unique identifier.
    pub id: AdjustmentId,
    /// Display name (e.g. "VAT 20%").
    pub name: String,
    /// Tax or discount.
    pub category: AdjustmentCategory,
    /// Computation kind and rate.
    #[serde(flatten)]
    pub rate: AdjustmentRate,
    /// Whether tax paid on purchases can be reclaimed.
    #[serde(default)]
    pub recoverable: bool,
    /// Item kind this adjustment is meant for.
    #[serde(default)]
    pub scope: AdjustmentScope,
    /// First day the adjustment applies, inclusive.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day the adjustment applies, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Adjustment {
    /// Creates an unrestricted adjustment with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, category: AdjustmentCategory, rate: AdjustmentRate) -> Self {
        Self {
            id: AdjustmentId::new(),
            name: name.into(),
            category,
            rate,
            recoverable: false,
            scope: AdjustmentScope::Unscoped,
            start_date: None,
            end_date: None,
        }
    }

    /// Percentage tax.
    pub fn percentage_tax(name: impl Into<String>, percent: Decimal) -> Result<Self, AdjustmentError> {
        Ok(Self::new(name, AdjustmentCategory::Tax, AdjustmentRate::percentage(percent)?))
    }

    /// Percentage discount.
    pub fn percentage_discount(
        name: impl Into<String>,
        percent: Decimal,
    ) -> Result<Self, AdjustmentError> {
        Ok(Self::new(name, AdjustmentCategory::Discount, AdjustmentRate::percentage(percent)?))
    }

    /// Fixed tax in minor units.
    pub fn fixed_tax(name: impl Into<String>, cents: i64) -> Result<Self, AdjustmentError> {
        Ok(Self::new(name, AdjustmentCategory::Tax, AdjustmentRate::fixed(cents)?))
    }

    /// Fixed discount in minor units.
    pub fn fixed_discount(name: impl Into<String>, cents: i64) -> Result<Self, AdjustmentError> {
        Ok(Self::new(name, AdjustmentCategory::Discount, AdjustmentRate::fixed(cents)?))
    }

    /// Marks the adjustment as recoverable.
    #[must_use]
    pub fn recoverable(mut self) -> Self {
        self.recoverable = true;
        self
    }

    /// Sets the item scope.
    #[must_use]
    pub fn with_scope(mut self, scope: AdjustmentScope) -> Self {
        self.scope = scope;
        self
    }

    /// Restricts the adjustment to a date window (either end optional).
    pub fn with_window(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, AdjustmentError> {
        self.start_date = start_date;
        self.end_date = end_date;
        self.validate()?;
        Ok(self)
    }

    /// The computation kind.
    #[must_use]
    pub const fn computation(&self) -> Computation {
        self.rate.computation()
    }

    /// Checks invariants that plain field assignment can break.
    pub fn validate(&self) -> Result<(), AdjustmentError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(AdjustmentError::InvalidWindow { start, end });
        }
        Ok(())
    }

    /// Returns true if `date` falls inside the validity window.
    #[must_use]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }
}
