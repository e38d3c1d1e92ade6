use crate::cli::validate::{
    parse_account_number, parse_amount, parse_city, parse_dob, parse_first_name,
    parse_last_name, parse_phone, parse_pin, parse_state, parse_street_address, parse_zip,
};
use crate::config::{LedgerConfig, DEFAULT_DB_PATH};
use crate::types::{AccountNumber, Pin};
use clap::{ArgAction, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Single-branch account ledger backed by a fixed-width flat file
#[derive(Parser, Debug)]
#[command(name = "branch-ledger")]
#[command(about = "Single-branch account ledger backed by a fixed-width flat file", long_about = None)]
pub struct CliArgs {
    /// Account file path
    #[arg(
        long = "db",
        value_name = "PATH",
        env = "BRANCH_LEDGER_DB",
        default_value = DEFAULT_DB_PATH,
        global = true,
        help = "Path to the account file (one fixed-width record per line)"
    )]
    pub db_path: PathBuf,

    /// Log verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase log output on stderr (-v info, -vv debug)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Account number and PIN identifying the session's account
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Credentials {
    #[arg(long = "account", value_name = "NUMBER", value_parser = parse_account_number)]
    pub account: AccountNumber,

    #[arg(long = "pin", value_name = "PIN", value_parser = parse_pin)]
    pub pin: Pin,
}

/// Personal details for a new account
#[derive(Args, Debug, Clone, PartialEq)]
pub struct OpenArgs {
    #[arg(long = "first-name", value_parser = parse_first_name)]
    pub first_name: String,

    #[arg(long = "last-name", value_parser = parse_last_name)]
    pub last_name: String,

    #[arg(long = "dob", value_name = "MM/DD/YYYY", value_parser = parse_dob)]
    pub dob: u32,

    #[arg(long = "phone", value_name = "DIGITS", value_parser = parse_phone)]
    pub phone: u64,

    #[command(flatten)]
    pub address: AddressArgs,

    #[arg(long = "pin", value_name = "PIN", value_parser = parse_pin)]
    pub pin: Pin,
}

/// Street address, city, state and postal code
#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddressArgs {
    #[arg(long = "street", value_parser = parse_street_address)]
    pub street_address: String,

    #[arg(long = "city", value_parser = parse_city)]
    pub city: String,

    #[arg(long = "state", help = "Two-letter abbreviation or full state name", value_parser = parse_state)]
    pub state: String,

    #[arg(long = "zip", value_name = "DIGITS", value_parser = parse_zip)]
    pub zip: String,
}

/// Ledger actions
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a new account with a zero balance
    Open(OpenArgs),

    /// Deposit money into an account
    Deposit {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long = "amount", value_parser = parse_amount)]
        amount: Decimal,
    },

    /// Withdraw money from an account
    Withdraw {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long = "amount", value_parser = parse_amount)]
        amount: Decimal,
    },

    /// Transfer money to another account
    Transfer {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long = "to", value_name = "NUMBER", value_parser = parse_account_number)]
        destination: AccountNumber,

        #[arg(long = "amount", value_parser = parse_amount)]
        amount: Decimal,
    },

    /// Show the current balance
    Balance(Credentials),

    /// Show the account holder's personal information
    Info(Credentials),

    /// Change the PIN
    UpdatePin {
        #[arg(long = "account", value_name = "NUMBER", value_parser = parse_account_number)]
        account: AccountNumber,

        #[arg(long = "current", value_name = "PIN", value_parser = parse_pin)]
        current: Pin,

        #[arg(long = "new", value_name = "PIN", value_parser = parse_pin)]
        new_pin: Pin,
    },

    /// Change the phone number
    UpdatePhone {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long = "phone", value_name = "DIGITS", value_parser = parse_phone)]
        phone: u64,
    },

    /// Change the mailing address
    UpdateAddress {
        #[command(flatten)]
        credentials: Credentials,

        #[command(flatten)]
        address: AddressArgs,
    },

    /// Close the account (the record is kept on file)
    Close(Credentials),

    /// Write a CSV report of all active accounts
    Report,
}

impl CliArgs {
    /// Build the runtime configuration from the parsed arguments
    pub fn to_config(&self) -> LedgerConfig {
        LedgerConfig::new(self.db_path.clone()).with_verbosity(self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    const OPEN: &[&str] = &[
        "program",
        "open",
        "--first-name",
        "Jane",
        "--last-name",
        "Doe",
        "--dob",
        "01/05/1990",
        "--phone",
        "5551234567",
        "--street",
        "1 Main Street",
        "--city",
        "Springfield",
        "--state",
        "Illinois",
        "--zip",
        "62701",
        "--pin",
        "1234",
    ];

    #[test]
    fn test_open_parsing() {
        let parsed = CliArgs::try_parse_from(OPEN).unwrap();
        match parsed.command {
            Command::Open(open) => {
                assert_eq!(open.first_name, "Jane");
                assert_eq!(open.dob, 19900105);
                assert_eq!(open.phone, 5551234567);
                assert_eq!(open.address.state, "Illinois");
                assert_eq!(open.pin, 1234);
            }
            other => panic!("Expected open, got {:?}", other),
        }
    }

    #[rstest]
    #[case::deposit(
        &["program", "deposit", "--account", "100000000", "--pin", "1234", "--amount", "25.50"],
        Command::Deposit {
            credentials: Credentials { account: 100000000, pin: 1234 },
            amount: Decimal::from_str("25.50").unwrap(),
        }
    )]
    #[case::transfer(
        &["program", "transfer", "--account", "100000000", "--pin", "0007", "--to", "100000001", "--amount", "1"],
        Command::Transfer {
            credentials: Credentials { account: 100000000, pin: 7 },
            destination: 100000001,
            amount: Decimal::ONE,
        }
    )]
    #[case::balance(
        &["program", "balance", "--account", "100000000", "--pin", "1234"],
        Command::Balance(Credentials { account: 100000000, pin: 1234 })
    )]
    #[case::update_pin(
        &["program", "update-pin", "--account", "100000000", "--current", "1234", "--new", "9999"],
        Command::UpdatePin { account: 100000000, current: 1234, new_pin: 9999 }
    )]
    #[case::report(&["program", "report"], Command::Report)]
    fn test_command_parsing(#[case] args: &[&str], #[case] expected: Command) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command, expected);
    }

    #[rstest]
    #[case::default_path(&["program", "report"], "accounts-db.txt", 0)]
    #[case::custom_path(&["program", "--db", "/tmp/ledger.txt", "report"], "/tmp/ledger.txt", 0)]
    #[case::global_after_subcommand(&["program", "report", "--db", "x.txt", "-vv"], "x.txt", 2)]
    fn test_global_options(#[case] args: &[&str], #[case] path: &str, #[case] verbose: u8) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.db_path, PathBuf::from(path));
        assert_eq!(parsed.verbose, verbose);
        assert_eq!(parsed.to_config().db_path, PathBuf::from(path));
    }

    #[rstest]
    #[case::missing_command(&["program"])]
    #[case::short_pin(&["program", "balance", "--account", "100000000", "--pin", "12"])]
    #[case::short_account(&["program", "balance", "--account", "1000", "--pin", "1234"])]
    #[case::zero_amount(&["program", "deposit", "--account", "100000000", "--pin", "1234", "--amount", "0"])]
    #[case::bad_phone(&["program", "update-phone", "--account", "100000000", "--pin", "1234", "--phone", "0123456789"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
