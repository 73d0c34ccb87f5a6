//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Currency table snapshot.
    pub currencies: CurrenciesConfig,
    /// Chart of accounts used when posting documents.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    /// Which account codes documents post to.
    pub posting: Option<PostingConfig>,
}

/// Currency table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrenciesConfig {
    /// Base (default) currency code. Its rate must be 1.
    pub base: String,
    /// All known currencies, including the base.
    pub entries: Vec<CurrencyEntryConfig>,
}

/// A single currency table row.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyEntryConfig {
    /// Currency code (ISO 4217).
    pub code: String,
    /// Exchange rate: 1 base unit = `rate` units of this currency.
    ///
    /// Write it as a string (`rate = "0.9215"`) to keep full precision.
    pub rate: Decimal,
    /// Number of decimal digits in the minor unit.
    #[serde(default = "default_precision")]
    pub precision: u8,
    /// Display symbol.
    #[serde(default)]
    pub symbol: String,
    /// Whether the symbol precedes the amount.
    #[serde(default = "default_symbol_first")]
    pub symbol_first: bool,
    /// Decimal mark used by the host formatter and amount input.
    #[serde(default = "default_decimal_mark")]
    pub decimal_mark: char,
    /// Thousands separator used by the host formatter and amount input.
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
}

fn default_precision() -> u8 {
    2
}

fn default_symbol_first() -> bool {
    true
}

fn default_decimal_mark() -> char {
    '.'
}

fn default_thousands_separator() -> char {
    ','
}

/// Chart of accounts row.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    /// Stable account id. Generated when omitted.
    pub id: Option<Uuid>,
    /// Account code (e.g. "1200").
    pub code: String,
    /// Human readable name.
    pub name: String,
    /// One of asset, liability, equity, revenue, expense.
    pub category: String,
}

/// Account codes used by document posting.
#[derive(Debug, Clone, Deserialize)]
pub struct PostingConfig {
    /// Accounts receivable (invoices).
    pub receivable: String,
    /// Accounts payable (bills).
    pub payable: String,
    /// Sales revenue.
    pub revenue: String,
    /// Purchase expense.
    pub expense: String,
    /// Tax collected on sales.
    pub tax_payable: String,
    /// Recoverable tax paid on purchases.
    pub tax_receivable: String,
    /// Discounts given on sales.
    pub sales_discount: String,
    /// Discounts received on purchases.
    pub purchase_discount: String,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration from a single TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn from_toml(text: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
