//! Error types for the branch ledger
//!
//! Two taxonomies live here and are kept deliberately apart:
//!
//! - **Rejections**: expected business-rule outcomes of ledger operations
//!   (invalid amount, exceeds maximum, insufficient funds, account not found).
//!   Callers branch on these; they never indicate a broken record or store.
//! - **Faults**: structural problems such as a malformed fixed-width record
//!   ([`RecordError`]) or a failing backing file ([`LedgerError::Io`]).

use super::account::AccountNumber;
use thiserror::Error;

/// Business-rule rejection returned by ledger operations
///
/// `Ok(())` from a ledger operation corresponds to the success code; every
/// rejection leaves the balances exactly as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    /// Amount was zero, negative, or finer than one cent
    #[error("Amount must be a positive number of whole cents")]
    InvalidAmount,

    /// Applying the amount would push the balance above the account maximum
    #[error("Account balance would exceed maximum")]
    ExceedsMaximum,

    /// Amount is larger than the current balance
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Transfer destination could not be resolved
    #[error("Account not found")]
    AccountNotFound,
}

impl Rejection {
    /// Legacy numeric code reported for a successful operation
    pub const SUCCESS_CODE: u8 = 4;

    /// Legacy numeric result code (0: invalid amount, 1: exceeds maximum,
    /// 2: insufficient funds, 3: account not found)
    pub fn code(self) -> u8 {
        match self {
            Rejection::InvalidAmount => 0,
            Rejection::ExceedsMaximum => 1,
            Rejection::InsufficientFunds => 2,
            Rejection::AccountNotFound => 3,
        }
    }
}

/// Structural error while encoding or decoding a fixed-width record
///
/// Always fatal to the single record involved; no partial account is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Line does not have the exact record width
    #[error("Record is {actual} characters long, expected {expected}")]
    WrongLength {
        /// Required record width
        expected: usize,
        /// Width of the offending line
        actual: usize,
    },

    /// A numeric column holds something other than ASCII digits
    #[error("Field '{field}' is not numeric: '{value}'")]
    InvalidNumber {
        /// Column name
        field: &'static str,
        /// Raw column content
        value: String,
    },

    /// Balance column is unparseable or outside `0..=ACCOUNT_MAXIMUM`
    #[error("Invalid balance '{value}'")]
    InvalidBalance {
        /// Raw column content
        value: String,
    },

    /// Status column holds an unknown flag
    #[error("Unknown account status '{status}'")]
    InvalidStatus {
        /// The flag that was found
        status: char,
    },

    /// A text value holds a control character such as a line break
    #[error("Field '{field}' contains a control character: {value:?}")]
    ControlCharacter {
        /// Column name
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// A numeric value is too wide for its column
    #[error("Value '{value}' does not fit the {width}-character '{field}' column")]
    FieldOverflow {
        /// Column name
        field: &'static str,
        /// Column width
        width: usize,
        /// Rendered value
        value: String,
    },
}

/// Main error type for ledger services and the CLI
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Business-rule rejection from a ledger operation
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Stored record could not be decoded or an account could not be encoded
    #[error("Malformed account record: {0}")]
    Record(#[from] RecordError),

    /// Backing file could not be read or written
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Report output could not be produced
    #[error("Report error: {message}")]
    Report {
        /// Description of the CSV error
        message: String,
    },

    /// No active account has this number
    #[error("Account {account} not found")]
    AccountNotFound {
        /// Account number that was looked up
        account: AccountNumber,
    },

    /// Account exists but the PIN does not match
    #[error("Invalid credentials for account {account}")]
    AuthenticationFailed {
        /// Account number used for the attempt
        account: AccountNumber,
    },

    /// PIN change was refused by the profile
    #[error("PIN for account {account} was not changed")]
    PinNotChanged {
        /// Account number
        account: AccountNumber,
    },

    /// Phone number is not 10 digits or starts with zero
    #[error("Invalid phone number {phone}")]
    InvalidPhone {
        /// Rejected phone number
        phone: u64,
    },

    /// State text matched neither an abbreviation nor a full state name
    #[error("Unrecognized state '{state}'")]
    UnrecognizedState {
        /// Rejected state text
        state: String,
    },

    /// Every 9-digit account number is taken
    #[error("No account numbers left after {last}")]
    AccountNumbersExhausted {
        /// Highest number in use
        last: AccountNumber,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::Report {
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountNumber) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create an AuthenticationFailed error
    pub fn authentication_failed(account: AccountNumber) -> Self {
        LedgerError::AuthenticationFailed { account }
    }

    /// Create an UnrecognizedState error
    pub fn unrecognized_state(state: &str) -> Self {
        LedgerError::UnrecognizedState {
            state: state.to_string(),
        }
    }
}
