//! Core traits for account persistence
//!
//! The ledger entity never touches storage itself. Services talk to an
//! [`AccountStore`], which hands out serialized records and writes them back,
//! so the flat file and the in-memory store are interchangeable.

use crate::types::{Account, AccountNumber, LedgerError};

/// Trait for the system of record holding serialized accounts
pub trait AccountStore {
    /// Return the record of the active account with this number
    ///
    /// Closed accounts are never returned.
    fn find(&self, number: AccountNumber) -> Result<Option<String>, LedgerError>;

    /// Replace or append the record of `account` and, if given, of `other`
    ///
    /// Both records are encoded before anything is written, so an encoding
    /// failure leaves the store unchanged.
    fn upsert(&mut self, account: &Account, other: Option<&Account>) -> Result<(), LedgerError>;

    /// Highest account number on file, closed accounts included
    fn max_account_number(&self) -> Result<Option<AccountNumber>, LedgerError>;

    /// Every record on file, in storage order
    fn records(&self) -> Result<Vec<String>, LedgerError>;
}
