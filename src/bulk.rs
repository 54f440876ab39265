//! Bulk purchase input parsing, quoting and submission guards
//!
//! Bulk input is one purchase per line, `phoneNumber capacity`, separated by
//! whitespace, commas or tabs. Parsing never fails as a whole: every bad
//! line becomes a [`ParseError`] and the rest of the batch is kept.

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{find_product, Product};
use crate::error::{BulkError, ValidationError};
use crate::network::Network;
use crate::phone::{normalize_phone, validate_phone};
use crate::utils::parse_float_prefix;

pub const MIN_CAPACITY_GB: f64 = 0.1;
pub const MAX_CAPACITY_GB: f64 = 100.0;

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format. Use: phoneNumber capacity";

/// One validated purchase ready to be submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseIntent {
    pub phone_number: String,
    pub capacity: f64,
    pub network: Network,
}

/// A rejected input line, numbered from 1. Line 0 means the source did
/// not say which line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub line: usize,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkParse {
    pub purchases: Vec<PurchaseIntent>,
    pub errors: Vec<ParseError>,
}

/// True when `capacity` is a finite, non-zero size within the sellable range.
pub fn is_valid_capacity(capacity: f64) -> bool {
    capacity.is_finite() && capacity != 0.0 && (MIN_CAPACITY_GB..=MAX_CAPACITY_GB).contains(&capacity)
}

fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_tokens(tokens: &[&str], line: usize, network: Network) -> Result<PurchaseIntent, ParseError> {
    if tokens.len() < 2 {
        return Err(ParseError { line, error: INVALID_FORMAT_MESSAGE.to_string() });
    }
    let phone_number = normalize_phone(tokens[0]);
    let capacity = parse_float_prefix(tokens[1]);

    if !validate_phone(&phone_number) {
        let error = ValidationError::InvalidPhone(tokens[0].to_string()).to_string();
        return Err(ParseError { line, error });
    }
    if !is_valid_capacity(capacity) {
        let error = ValidationError::InvalidCapacity(tokens[1].to_string()).to_string();
        return Err(ParseError { line, error });
    }
    Ok(PurchaseIntent { phone_number, capacity, network })
}

fn push_result(out: &mut BulkParse, result: Result<PurchaseIntent, ParseError>) {
    match result {
        Ok(intent) => out.purchases.push(intent),
        Err(e) => out.errors.push(e),
    }
}

/// Parse free-text bulk input. Blank lines are skipped and do not count
/// towards line numbers.
pub fn parse_bulk_input(text: &str, default_network: Network) -> BulkParse {
    let mut out = BulkParse::default();
    let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    for (idx, line) in lines.enumerate() {
        let tokens = tokenize(line);
        push_result(&mut out, parse_tokens(&tokens, idx + 1, default_network));
    }
    out
}

/// Parse a CSV spreadsheet export where the first two columns are phone
/// number and capacity. The first row is skipped as a header only when
/// neither its phone cell has digits nor its capacity cell is numeric;
/// anything else is parsed and reported like any other row.
pub fn parse_bulk_csv<R: Read>(reader: R, default_network: Network) -> Result<BulkParse, BulkError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = BulkParse::default();
    let mut line = 0;
    for (record_idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        if record_idx == 0 && looks_like_header(&record) {
            tracing::debug!(header = ?record, "Skipping CSV header row");
            continue;
        }
        line += 1;
        let tokens: Vec<&str> = record.iter().filter(|c| !c.is_empty()).collect();
        push_result(&mut out, parse_tokens(&tokens, line, default_network));
    }
    Ok(out)
}

fn looks_like_header(record: &csv::StringRecord) -> bool {
    let phone = record.get(0).unwrap_or_default();
    let capacity = record.get(1).unwrap_or_default();
    !phone.chars().any(|c| c.is_ascii_digit()) && parse_float_prefix(capacity).is_nan()
}

/// A parsed purchase with the catalog price it matched, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotedPurchase {
    pub intent: PurchaseIntent,
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkQuote {
    pub lines: Vec<QuotedPurchase>,
    pub total: f64,
    /// Indexes into `lines` with no matching product. They add nothing to `total`.
    pub unmatched: Vec<usize>,
}

/// Price each purchase against the catalog and sum the matches.
pub fn quote_bulk(purchases: &[PurchaseIntent], products: &[Product]) -> BulkQuote {
    let mut quote = BulkQuote::default();
    for (idx, intent) in purchases.iter().enumerate() {
        let unit_price = find_product(products, intent.network.as_str(), intent.capacity).map(|p| p.price);
        match unit_price {
            Some(price) => quote.total += price,
            None => quote.unmatched.push(idx),
        }
        quote.lines.push(QuotedPurchase { intent: intent.clone(), unit_price });
    }
    quote
}

/// Why a bulk submission was refused locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionBlocked {
    #[error("No valid purchases to submit")]
    Empty,

    #[error("Insufficient balance: need GH₵ {required:.2}, have GH₵ {available:.2}")]
    InsufficientBalance { required: f64, available: f64 },
}

/// Client-side guard before a bulk submission. An unknown balance is not
/// checked; the server has the final say either way.
pub fn check_submission(
    purchases: &[PurchaseIntent],
    total: f64,
    balance: Option<f64>,
) -> Result<(), SubmissionBlocked> {
    if purchases.is_empty() {
        return Err(SubmissionBlocked::Empty);
    }
    if let Some(available) = balance {
        if total > available {
            return Err(SubmissionBlocked::InsufficientBalance { required: total, available });
        }
    }
    Ok(())
}
