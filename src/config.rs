//! Runtime configuration
//!
//! Resolved once at startup from CLI flags and the environment (clap reads
//! `BRANCH_LEDGER_DB` for the account file path).

use std::path::PathBuf;
use tracing::Level;

/// Account file used when neither `--db` nor `BRANCH_LEDGER_DB` is given
pub const DEFAULT_DB_PATH: &str = "accounts-db.txt";

/// Configuration for one ledger run
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Path of the flat account file
    pub db_path: PathBuf,

    /// Most verbose level logged when `RUST_LOG` is not set
    pub log_level: Level,
}

impl LedgerConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        LedgerConfig {
            db_path: db_path.into(),
            log_level: Level::WARN,
        }
    }

    /// Map a `-v` count onto a log level (0: warn, 1: info, 2+: debug)
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        self.log_level = match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        };
        self
    }

    /// Default `EnvFilter` directive for this crate
    pub fn log_directive(&self) -> String {
        format!("branch_ledger={}", self.log_level.as_str().to_lowercase())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
