//! Benchmark suite for the fixed-width record codec
//!
//! Measures encoding and decoding of single records and a full scan of a
//! branch-sized account file, using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```

use branch_ledger::io::record_format::{decode, encode};
use branch_ledger::types::{Account, AccountStatus, IdentityProfile};
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

fn sample_account(number: u64) -> Account {
    let profile = IdentityProfile::new(
        4321,
        19851026,
        7025550111,
        "Emmett",
        "Brown",
        "1640 Riverside Drive",
        "Hill Valley",
        "CA",
        "95420",
    );
    Account::restore(
        AccountStatus::Active,
        number,
        Decimal::new(1_234_567, 2),
        profile,
    )
    .expect("Sample balance is in range")
}

/// Encode a single account
#[divan::bench]
fn encode_record(bencher: divan::Bencher) {
    let account = sample_account(100000000);
    bencher.bench(|| encode(divan::black_box(&account)).expect("Encoding failed"));
}

/// Decode a single record
#[divan::bench]
fn decode_record(bencher: divan::Bencher) {
    let line = encode(&sample_account(100000000)).expect("Encoding failed");
    bencher.bench(|| decode(divan::black_box(&line)).expect("Decoding failed"));
}

/// Decode every record of a file with the given number of accounts
#[divan::bench(args = [100, 1_000, 10_000])]
fn decode_file(bencher: divan::Bencher, accounts: u64) {
    let lines: Vec<String> = (0..accounts)
        .map(|i| encode(&sample_account(100000000 + i)).expect("Encoding failed"))
        .collect();

    bencher.bench(|| {
        lines
            .iter()
            .map(|line| decode(line).expect("Decoding failed"))
            .filter(Account::is_active)
            .count()
    });
}
