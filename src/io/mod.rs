//! I/O module
//!
//! Handles persistence formats and output.
//!
//! # Components
//!
//! - `record_format` - Fixed-width record encoding and decoding
//! - `flat_file_store` - Text-file account store, one record per line
//! - `csv_format` - CSV branch report output

pub mod csv_format;
pub mod flat_file_store;
pub mod record_format;

pub use csv_format::{write_accounts_csv, ReportRow};
pub use flat_file_store::FlatFileStore;
pub use record_format::{decode, encode, Field, RECORD_LAYOUT, RECORD_WIDTH};
