//! Command line interface

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::Config;
use crate::pricing::AdditionalCharge;

/// Show the priced detail and payment position of one order
#[derive(Debug, Clone, Parser)]
#[command(name = "stitch-desk", version, about)]
pub struct Cli {
    /// Human-readable order number (e.g. TV-0042)
    pub order_number: String,

    /// Read rows from an exported JSON snapshot instead of the store
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Extra charge added to the grand total (repeatable)
    #[arg(long = "charge", value_name = "NAME=AMOUNT", value_parser = parse_charge)]
    pub charges: Vec<AdditionalCharge>,

    /// Write the order id onto receipts that only match by order number
    #[arg(long)]
    pub backfill_receipts: bool,

    /// Print the result as a JSON response envelope
    #[arg(long)]
    pub json: bool,

    /// Store base URL
    #[arg(long, env = "STORE_URL")]
    pub store_url: Option<String>,

    /// Log filter
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Apply command line overrides on top of `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.store_url {
            config.store_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}

/// Rejected `--charge` value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChargeError {
    #[error("expected NAME=AMOUNT, got '{0}'")]
    MissingSeparator(String),
    #[error("charge name is empty")]
    EmptyName,
    #[error("invalid amount '{amount}' for charge {name}")]
    InvalidAmount { name: String, amount: String },
}

/// Parse `NAME=AMOUNT`
pub fn parse_charge(raw: &str) -> Result<AdditionalCharge, ChargeError> {
    let (name, amount) = raw
        .split_once('=')
        .ok_or_else(|| ChargeError::MissingSeparator(raw.to_string()))?;
    let (name, amount) = (name.trim(), amount.trim());
    if name.is_empty() {
        return Err(ChargeError::EmptyName);
    }
    let invalid = || ChargeError::InvalidAmount {
        name: name.to_string(),
        amount: amount.to_string(),
    };
    let value: f64 = amount.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(AdditionalCharge::new(name, value))
}
