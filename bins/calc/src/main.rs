//! Folio calculator
//!
//! Totals and posts invoice/bill documents read from JSON files.

mod request;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::currency::CurrencyTable;
use folio_core::document::{DocumentPosting, DocumentTotalsCalculator, PostingAccounts};
use folio_core::ledger::Account;
use folio_shared::AppConfig;
use folio_shared::types::CurrencyCode;

use request::CalcRequest;

#[derive(Parser)]
#[command(name = "folio-calc")]
#[command(about = "Document totals and ledger posting")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute subtotal, tax, discount and grand total for a document
    #[command(after_help = "\
Examples:
  folio-calc totals demos/invoice.json
  folio-calc totals demos/invoice.json --currency EUR")]
    Totals {
        /// Request file (document, adjustments, as_of)
        input: PathBuf,

        /// Convert the totals into this currency
        #[arg(long, short = 'c')]
        currency: Option<String>,
    },

    /// Post a document to a committed ledger transaction
    #[command(after_help = "\
Examples:
  folio-calc post demos/invoice.json")]
    Post {
        /// Request file (document, adjustments, as_of)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    let output = match cli.command {
        Commands::Totals { input, currency } => totals(&config, &input, currency.as_deref())?,
        Commands::Post { input } => post(&config, &input)?,
    };
    println!("{output}");
    Ok(())
}

fn read_request(path: &Path) -> Result<CalcRequest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    CalcRequest::from_json(&text).with_context(|| format!("invalid request in {}", path.display()))
}

fn totals(config: &AppConfig, input: &Path, currency: Option<&str>) -> Result<String> {
    let request = read_request(input)?;
    let catalog = request.catalog()?;
    let ctx = request.context();

    let totals = match currency {
        Some(code) => {
            let target = CurrencyCode::new(code)?;
            let table = CurrencyTable::from_config(&config.currencies)
                .context("invalid currency table")?;
            DocumentTotalsCalculator::compute_converted(
                &request.document,
                &catalog,
                &ctx,
                target,
                &table,
            )?
        }
        None => DocumentTotalsCalculator::compute_document(&request.document, &catalog, &ctx)?,
    };

    info!(
        document_id = %request.document.id,
        currency = %totals.currency(),
        grand_total = totals.grand_total.amount_cents,
        "Computed totals"
    );
    Ok(serde_json::to_string_pretty(&totals)?)
}

fn post(config: &AppConfig, input: &Path) -> Result<String> {
    let request = read_request(input)?;
    let posting = config
        .posting
        .as_ref()
        .context("no [posting] section in configuration")?;
    let chart = config
        .accounts
        .iter()
        .map(Account::from_config)
        .collect::<Result<Vec<_>, _>>()
        .context("invalid chart of accounts")?;
    let accounts = PostingAccounts::from_config(posting, &chart)?;

    let ctx = request.context();
    let catalog = request.catalog()?;
    let totals = DocumentTotalsCalculator::compute_document(&request.document, &catalog, &ctx)?;
    let mut transaction = DocumentPosting::post(&request.document, &totals, &accounts, &ctx)?;
    transaction.commit(&ctx)?;

    info!(
        document_id = %request.document.id,
        transaction_id = %transaction.id,
        entries = transaction.entries().len(),
        "Posted document"
    );
    Ok(serde_json::to_string_pretty(&transaction)?)
}
