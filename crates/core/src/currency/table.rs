//! Currency table: exchange rates and formatting metadata.
//!
//! The table is a read-only snapshot handed to the core by the host. Rates
//! are expressed relative to a single base currency: `1 base = rate target`.

use std::collections::HashMap;

use folio_shared::config::CurrenciesConfig;
use folio_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::CurrencyError;

/// Largest supported number of minor-unit digits.
pub const MAX_PRECISION: u8 = 6;

/// One row of the currency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// Currency code.
    pub code: CurrencyCode,
    /// Units of this currency per one unit of the base currency.
    pub rate: Decimal,
    /// Number of decimal digits in the minor unit (2 for USD, 0 for JPY).
    pub precision: u8,
    /// Display symbol.
    pub symbol: String,
    /// Whether the symbol precedes the amount.
    pub symbol_first: bool,
    /// Decimal mark.
    pub decimal_mark: char,
    /// Thousands separator.
    pub thousands_separator: char,
}

impl CurrencyInfo {
    /// Creates an entry with `.`/`,` separators and a leading symbol.
    #[must_use]
    pub fn new(code: CurrencyCode, rate: Decimal, precision: u8, symbol: impl Into<String>) -> Self {
        Self {
            code,
            rate,
            precision,
            symbol: symbol.into(),
            symbol_first: true,
            decimal_mark: '.',
            thousands_separator: ',',
        }
    }

    /// Minor units per major unit (`10^precision`), or `None` if that does
    /// not fit in `i64`.
    #[must_use]
    pub fn subunit(&self) -> Option<i64> {
        10_i64.checked_pow(u32::from(self.precision))
    }
}

/// Exchange rates and formatting metadata keyed by currency code.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    base: CurrencyCode,
    entries: HashMap<CurrencyCode, CurrencyInfo>,
}

impl CurrencyTable {
    /// Builds a validated table.
    ///
    /// # Errors
    ///
    /// Fails if the base is missing, the base rate is not 1, any rate is not
    /// positive, a precision is above [`MAX_PRECISION`], or a code repeats.
    pub fn new(
        base: CurrencyCode,
        entries: impl IntoIterator<Item = CurrencyInfo>,
    ) -> Result<Self, CurrencyError> {
        let mut map = HashMap::new();
        for info in entries {
            if info.rate <= Decimal::ZERO {
                return Err(CurrencyError::InvalidRate {
                    code: info.code,
                    rate: info.rate,
                });
            }
            if info.precision > MAX_PRECISION {
                return Err(CurrencyError::InvalidPrecision {
                    code: info.code,
                    precision: info.precision,
                });
            }
            let code = info.code;
            if map.insert(code, info).is_some() {
                return Err(CurrencyError::DuplicateCurrency(code));
            }
        }

        let base_info = map.get(&base).ok_or(CurrencyError::MissingBase(base))?;
        if base_info.rate != Decimal::ONE {
            return Err(CurrencyError::InvalidBaseRate {
                code: base,
                rate: base_info.rate,
            });
        }

        Ok(Self { base, entries: map })
    }

    /// Builds a table from configuration.
    ///
    /// # Errors
    ///
    /// Fails on malformed codes or any [`CurrencyTable::new`] validation error.
    pub fn from_config(config: &CurrenciesConfig) -> Result<Self, CurrencyError> {
        let base = CurrencyCode::new(&config.base)?;
        let entries = config
            .entries
            .iter()
            .map(|entry| {
                Ok(CurrencyInfo {
                    code: CurrencyCode::new(&entry.code)?,
                    rate: entry.rate,
                    precision: entry.precision,
                    symbol: entry.symbol.clone(),
                    symbol_first: entry.symbol_first,
                    decimal_mark: entry.decimal_mark,
                    thousands_separator: entry.thousands_separator,
                })
            })
            .collect::<Result<Vec<_>, CurrencyError>>()?;
        Self::new(base, entries)
    }

    /// The base (default) currency.
    #[must_use]
    pub fn base(&self) -> CurrencyCode {
        self.base
    }

    /// Looks up a currency.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if the code is not in the table.
    pub fn get(&self, code: CurrencyCode) -> Result<&CurrencyInfo, CurrencyError> {
        self.entries
            .get(&code)
            .ok_or(CurrencyError::UnknownCurrency(code))
    }

    /// Returns true if the code is in the table.
    #[must_use]
    pub fn contains(&self, code: CurrencyCode) -> bool {
        self.entries.contains_key(&code)
    }

    /// Number of currencies in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty. A valid table never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
