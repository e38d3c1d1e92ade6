//! CSV report output
//!
//! Produces a branch report with columns `account,name,balance,status`.
//! Accounts are sorted by number for deterministic output and balances are
//! written with two decimal places.

use crate::types::{Account, AccountNumber, LedgerError};
use serde::Serialize;
use std::io::Write;

/// One report row
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReportRow {
    pub account: AccountNumber,
    pub name: String,
    pub balance: String,
    pub status: char,
}

impl From<&Account> for ReportRow {
    fn from(account: &Account) -> Self {
        ReportRow {
            account: account.number(),
            name: account.profile().full_name(),
            balance: format!("{:.2}", account.balance()),
            status: account.status().as_char(),
        }
    }
}

/// Write accounts as a CSV report
///
/// # Errors
///
/// Returns [`LedgerError::Report`] if a row cannot be written, and
/// [`LedgerError::Io`] if the output cannot be flushed.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    let mut rows: Vec<ReportRow> = accounts.iter().map(ReportRow::from).collect();
    rows.sort_by_key(|row| row.account);

    if rows.is_empty() {
        writer.write_record(["account", "name", "balance", "status"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
