//! Command execution
//!
//! Runs one parsed [`Command`] through a [`Teller`] and writes the
//! human-readable result to `output`.

use crate::cli::args::{AddressArgs, Command, OpenArgs};
use crate::core::{AccountStore, AddressChange, Teller};
use crate::io::write_accounts_csv;
use crate::types::{Account, IdentityProfile, LedgerError};
use rust_decimal::Decimal;
use std::io::Write;

/// Execute a command against the ledger
///
/// # Errors
///
/// Returns the first [`LedgerError`] hit: a rejection, a failed lookup or
/// login, or a storage / output failure.
pub fn run<S: AccountStore>(
    command: Command,
    teller: &mut Teller<S>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match command {
        Command::Open(open) => {
            let account = teller.open_account(profile_from(open))?;
            writeln!(
                output,
                "Opened account {} for {}.",
                account.number(),
                account.profile().full_name()
            )?;
        }
        Command::Deposit {
            credentials,
            amount,
        } => {
            let account = teller.deposit(credentials.account, credentials.pin, amount)?;
            writeln!(
                output,
                "Deposited {}. Your updated balance is {}.",
                format_money(amount),
                format_money(account.balance())
            )?;
        }
        Command::Withdraw {
            credentials,
            amount,
        } => {
            let account = teller.withdraw(credentials.account, credentials.pin, amount)?;
            writeln!(
                output,
                "Withdrew {}. Your updated balance is {}.",
                format_money(amount),
                format_money(account.balance())
            )?;
        }
        Command::Transfer {
            credentials,
            destination,
            amount,
        } => {
            let account =
                teller.transfer(credentials.account, credentials.pin, destination, amount)?;
            writeln!(
                output,
                "Transferred {} to {}. Your updated balance is {}.",
                format_money(amount),
                destination,
                format_money(account.balance())
            )?;
        }
        Command::Balance(credentials) => {
            let account = teller.authenticate(credentials.account, credentials.pin)?;
            writeln!(
                output,
                "Current balance is {}.",
                format_money(account.balance())
            )?;
        }
        Command::Info(credentials) => {
            let account = teller.authenticate(credentials.account, credentials.pin)?;
            write_personal_info(&account, output)?;
        }
        Command::UpdatePin {
            account,
            current,
            new_pin,
        } => {
            if current == new_pin {
                teller.authenticate(account, current)?;
                writeln!(
                    output,
                    "The new PIN did not differ from the current PIN. No changes made."
                )?;
            } else {
                teller.change_pin(account, current, new_pin)?;
                writeln!(output, "Successfully changed PIN.")?;
            }
        }
        Command::UpdatePhone { credentials, phone } => {
            let before = teller.authenticate(credentials.account, credentials.pin)?;
            let after = teller.change_phone(credentials.account, credentials.pin, phone)?;
            let (previous, current) = (
                before.profile().formatted_phone(),
                after.profile().formatted_phone(),
            );
            if previous == current {
                writeln!(
                    output,
                    "The new phone number did not differ from the current phone number. No changes made."
                )?;
            } else {
                writeln!(
                    output,
                    "Successfully changed phone number from {} to {}.",
                    previous, current
                )?;
            }
        }
        Command::UpdateAddress {
            credentials,
            address,
        } => {
            let before = teller.authenticate(credentials.account, credentials.pin)?;
            let after = teller.change_address(
                credentials.account,
                credentials.pin,
                &address_change(address),
            )?;
            let (previous, current) = (mailing_address(&before), mailing_address(&after));
            if previous == current {
                writeln!(
                    output,
                    "The new address did not differ from the current address. No changes made."
                )?;
            } else {
                writeln!(
                    output,
                    "Successfully changed address from:\n\n{}\n\nto:\n\n{}",
                    previous, current
                )?;
            }
        }
        Command::Close(credentials) => {
            let account = teller.close(credentials.account, credentials.pin)?;
            writeln!(output, "Account {} closed.", account.number())?;
        }
        Command::Report => {
            let accounts = teller.active_accounts()?;
            write_accounts_csv(&accounts, output)?;
        }
    }

    Ok(())
}

fn profile_from(open: OpenArgs) -> IdentityProfile {
    IdentityProfile::new(
        open.pin,
        open.dob,
        open.phone,
        open.first_name,
        open.last_name,
        open.address.street_address,
        open.address.city,
        &open.address.state,
        open.address.zip,
    )
}

fn address_change(address: AddressArgs) -> AddressChange {
    AddressChange {
        street_address: address.street_address,
        city: address.city,
        state: address.state,
        zip: address.zip,
    }
}

fn mailing_address(account: &Account) -> String {
    format!(
        "{}\n{}",
        account.profile().street_address(),
        account.profile().formatted_address()
    )
}

fn write_personal_info(account: &Account, output: &mut dyn Write) -> std::io::Result<()> {
    let profile = account.profile();
    writeln!(output, "     Account # : {}", account.number())?;
    writeln!(output, "Account Holder : {}", profile.full_name())?;
    writeln!(output, "       Address : {}", profile.street_address())?;
    writeln!(output, "                 {}", profile.formatted_address())?;
    writeln!(output, " Date of Birth : {}", profile.formatted_dob())?;
    writeln!(output, "     Telephone : {}", profile.formatted_phone())
}

/// Render money as `$1,234.56`
pub fn format_money(amount: Decimal) -> String {
    let rendered = format!("{:.2}", amount.abs());
    let (whole, cents) = rendered.split_once('.').unwrap_or((&rendered, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}
