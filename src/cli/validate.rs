//! Input validation for human-entered values
//!
//! Predicates and clap value parsers for the CLI. Text inputs are checked
//! against the record column widths here so that nothing gets cut short
//! when the account is written back.

use crate::io::record_format::Field;
use crate::types::{abbreviate_state, AccountNumber, Pin};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly four digits
pub fn is_valid_pin(text: &str) -> bool {
    text.len() == 4 && all_digits(text)
}

/// Exactly ten digits, not starting with zero
pub fn is_valid_phone(text: &str) -> bool {
    text.len() == 10 && all_digits(text) && !text.starts_with('0')
}

/// Exactly five digits
pub fn is_valid_zip(text: &str) -> bool {
    text.len() == 5 && all_digits(text)
}

/// A state abbreviation or full state name
pub fn is_valid_state(text: &str) -> bool {
    text.len() >= 2 && abbreviate_state(text).is_some()
}

/// Non-empty, free of control characters and no wider than `width` characters
pub fn is_valid_text(text: &str, width: usize) -> bool {
    !text.trim().is_empty()
        && !text.chars().any(char::is_control)
        && text.chars().count() <= width
}

pub fn parse_account_number(text: &str) -> Result<AccountNumber, String> {
    if text.len() != Field::AccountNumber.width() || !all_digits(text) {
        return Err(format!("account numbers are exactly 9 digits, got '{}'", text));
    }
    text.parse().map_err(|_| format!("invalid account number '{}'", text))
}

pub fn parse_pin(text: &str) -> Result<Pin, String> {
    if !is_valid_pin(text) {
        return Err("PINs are exactly 4 digits".to_string());
    }
    text.parse().map_err(|_| "PINs are exactly 4 digits".to_string())
}

pub fn parse_phone(text: &str) -> Result<u64, String> {
    if !is_valid_phone(text) {
        return Err(
            "phone numbers should be exactly 10 digits and cannot start with 0".to_string(),
        );
    }
    text.parse().map_err(|_| format!("invalid phone number '{}'", text))
}

pub fn parse_zip(text: &str) -> Result<String, String> {
    if !is_valid_zip(text) {
        return Err("postal codes are exactly 5 digits".to_string());
    }
    Ok(text.to_string())
}

pub fn parse_state(text: &str) -> Result<String, String> {
    if text.chars().any(char::is_control) || !is_valid_state(text) {
        return Err(format!("'{}' is not a U.S. state", text));
    }
    Ok(text.to_string())
}

/// Parse `MM/DD/YYYY` into the `YYYYMMDD` integer stored on the profile
pub fn parse_dob(text: &str) -> Result<u32, String> {
    let invalid = || format!("dates of birth are MM/DD/YYYY, got '{}'", text);
    if text.len() != 10 {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(text, "%m/%d/%Y").map_err(|_| invalid())?;
    let year = u32::try_from(date.year()).map_err(|_| invalid())?;
    if !(1000..=9999).contains(&year) {
        return Err(invalid());
    }
    Ok(year * 10_000 + date.month() * 100 + date.day())
}

/// Parse a money amount of at least $0.01
pub fn parse_amount(text: &str) -> Result<Decimal, String> {
    let amount =
        Decimal::from_str(text.trim()).map_err(|_| "amount must be a numeric value".to_string())?;
    if amount < Decimal::new(1, 2) {
        return Err("amount must be greater than or equal to $0.01".to_string());
    }
    Ok(amount)
}

/// Trimmed text that fits its record column
fn parse_text(text: &str, field: Field) -> Result<String, String> {
    let text = text.trim();
    if !is_valid_text(text, field.width()) {
        return Err(format!(
            "must be between 1 and {} printable characters",
            field.width()
        ));
    }
    Ok(text.to_string())
}

pub fn parse_first_name(text: &str) -> Result<String, String> {
    parse_text(text, Field::FirstName)
}

pub fn parse_last_name(text: &str) -> Result<String, String> {
    parse_text(text, Field::LastName)
}

pub fn parse_street_address(text: &str) -> Result<String, String> {
    parse_text(text, Field::StreetAddress)
}

pub fn parse_city(text: &str) -> Result<String, String> {
    parse_text(text, Field::City)
}
