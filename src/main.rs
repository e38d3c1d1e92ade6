//! Branch Ledger CLI
//!
//! Command-line teller for a single-branch account file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- open --first-name Jane --last-name Doe --dob 01/05/1990 \
//!     --phone 5551234567 --street "1 Main Street" --city Springfield \
//!     --state IL --zip 62701 --pin 1234
//! cargo run -- deposit --account 100000000 --pin 1234 --amount 250.00
//! cargo run -- transfer --account 100000000 --pin 1234 --to 100000001 --amount 20
//! cargo run -- --db branch.txt report > accounts.csv
//! ```
//!
//! The account file defaults to `accounts-db.txt` and can be set with `--db`
//! or `BRANCH_LEDGER_DB`. Logs go to stderr (`-v`, `-vv`, or `RUST_LOG`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (rejected operation, unknown account, bad PIN, unreadable file, etc.)

use branch_ledger::{cli, logging, FlatFileStore, Teller};
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    let config = args.to_config();
    logging::init_tracing(&config);

    let mut teller = Teller::new(FlatFileStore::new(config.db_path.clone()));

    // Results go to stdout, errors to stderr
    let mut output = std::io::stdout();
    if let Err(e) = cli::run(args.command, &mut teller, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
