//! Branch Ledger Library
//! # Overview
//!
//! This library keeps the accounts of a single bank branch in a flat text
//! file, one fixed-width record per line, and runs teller operations
//! against them.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, IdentityProfile, errors)
//! - [`io`] - Record codec, flat-file store and CSV report output
//! - [`core`] - Business logic components:
//!   - [`core::traits`] - The `find` / `upsert` store abstraction
//!   - [`core::teller`] - Load, authenticate, mutate and write back
//!   - [`core::memory_store`] - In-memory store for tests and embedding
//! - [`cli`] - CLI arguments parsing and command execution
//! - [`config`] / [`logging`] - Runtime settings and tracing setup
//!
//! # Ledger Operations
//!
//! - **Deposit**: Credit a positive amount, up to the account maximum
//! - **Withdraw**: Debit a positive amount no larger than the balance
//! - **Transfer**: Withdraw from one account and deposit into another
//!
//! Each one returns `Ok(())` or a [`Rejection`]; a rejected operation never
//! changes a balance.
//!
//! # Record Format
//!
//! Every account is one 149-character line; see [`io::record_format`] for
//! the column layout.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod logging;
pub mod types;

pub use config::LedgerConfig;
pub use core::{AccountStore, MemoryStore, Teller};
pub use io::{write_accounts_csv, FlatFileStore};
pub use types::{
    Account, AccountNumber, AccountStatus, IdentityProfile, LedgerError, Pin, RecordError,
    Rejection,
};
