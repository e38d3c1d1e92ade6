//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: the account ledger entity and its balance rules
//! - `profile`: the identity profile embedded in an account
//! - `error`: rejections and fault types

pub mod account;
pub mod error;
pub mod profile;

pub use account::{
    Account, AccountNumber, AccountStatus, ACCOUNT_MAXIMUM, FIRST_ACCOUNT_NUMBER,
    MAX_ACCOUNT_NUMBER, MONEY_SCALE,
};
pub use error::{LedgerError, RecordError, Rejection};
pub use profile::{abbreviate_state, IdentityProfile, Pin, PIN_MAX};
