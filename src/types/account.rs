//! Account ledger entity
//!
//! An [`Account`] holds a status flag, a 9-digit account number, a balance and
//! the holder's [`IdentityProfile`]. Every ledger operation validates first and
//! mutates second, so a rejected call never leaves a partial update behind.
//! Mutation goes through `&mut self`, which keeps a single writer per account.

use super::error::Rejection;
use super::profile::IdentityProfile;
use rust_decimal::Decimal;

/// Account identifier (9 digits)
pub type AccountNumber = u64;

/// Smallest 9-digit account number, handed out when the store is empty
pub const FIRST_ACCOUNT_NUMBER: AccountNumber = 100_000_000;

/// Largest 9-digit account number
pub const MAX_ACCOUNT_NUMBER: AccountNumber = 999_999_999;

/// Upper bound for any balance: 999,999,999,999.99
pub const ACCOUNT_MAXIMUM: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Balances and amounts are kept in whole cents
pub const MONEY_SCALE: u32 = 2;

/// Account status flag as stored in the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Open for business (`Y`)
    Active,
    /// Closed accounts stay on file but are no longer found by the store (`N`)
    Closed,
}

impl AccountStatus {
    pub fn as_char(self) -> char {
        match self {
            AccountStatus::Active => 'Y',
            AccountStatus::Closed => 'N',
        }
    }

    pub fn from_char(flag: char) -> Option<Self> {
        match flag {
            'Y' => Some(AccountStatus::Active),
            'N' => Some(AccountStatus::Closed),
            _ => None,
        }
    }
}

/// One account with its balance and owning profile
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    status: AccountStatus,
    number: AccountNumber,
    balance: Decimal,
    profile: IdentityProfile,
}

impl Account {
    /// Open a fresh, active account with a zero balance
    ///
    /// The number is assigned by the store; the account never picks its own.
    pub fn open(number: AccountNumber, profile: IdentityProfile) -> Self {
        Account {
            status: AccountStatus::Active,
            number,
            balance: Decimal::ZERO,
            profile,
        }
    }

    /// Rebuild an account from persisted state
    ///
    /// Returns `None` if `balance` is outside `0..=ACCOUNT_MAXIMUM`.
    pub fn restore(
        status: AccountStatus,
        number: AccountNumber,
        balance: Decimal,
        profile: IdentityProfile,
    ) -> Option<Self> {
        if balance < Decimal::ZERO || balance > ACCOUNT_MAXIMUM {
            return None;
        }
        Some(Account {
            status,
            number,
            balance,
            profile,
        })
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn profile(&self) -> &IdentityProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut IdentityProfile {
        &mut self.profile
    }

    /// Mark the account closed; the record itself is kept
    pub fn close(&mut self) {
        self.status = AccountStatus::Closed;
    }

    /// Deposit funds
    ///
    /// # Errors
    ///
    /// - [`Rejection::InvalidAmount`] if `amount <= 0` or has sub-cent digits
    /// - [`Rejection::ExceedsMaximum`] if the new balance would pass [`ACCOUNT_MAXIMUM`]
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), Rejection> {
        self.balance = self.balance_after_deposit(amount)?;
        Ok(())
    }

    /// Withdraw funds
    ///
    /// # Errors
    ///
    /// - [`Rejection::InvalidAmount`] if `amount <= 0` or has sub-cent digits
    /// - [`Rejection::InsufficientFunds`] if `amount` is larger than the balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), Rejection> {
        self.balance = self.balance_after_withdrawal(amount)?;
        Ok(())
    }

    /// Move funds from this account to `destination`
    ///
    /// `None` stands for a destination lookup that found nothing. Withdrawal
    /// checks on this account and deposit checks on the destination both run
    /// before either balance moves, so any rejection leaves both untouched.
    ///
    /// # Errors
    ///
    /// - [`Rejection::AccountNotFound`] if `destination` is `None`
    /// - any rejection from [`Account::withdraw`] on this account
    /// - any rejection from [`Account::deposit`] on the destination
    pub fn transfer(
        &mut self,
        destination: Option<&mut Account>,
        amount: Decimal,
    ) -> Result<(), Rejection> {
        let destination = destination.ok_or(Rejection::AccountNotFound)?;

        let source_balance = self.balance_after_withdrawal(amount)?;
        let destination_balance = destination.balance_after_deposit(amount)?;

        self.balance = source_balance;
        destination.balance = destination_balance;

        Ok(())
    }

    fn balance_after_deposit(&self, amount: Decimal) -> Result<Decimal, Rejection> {
        validate_amount(amount)?;

        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or(Rejection::ExceedsMaximum)?;

        if new_balance > ACCOUNT_MAXIMUM {
            return Err(Rejection::ExceedsMaximum);
        }

        Ok(new_balance)
    }

    fn balance_after_withdrawal(&self, amount: Decimal) -> Result<Decimal, Rejection> {
        validate_amount(amount)?;

        if amount > self.balance {
            return Err(Rejection::InsufficientFunds);
        }

        self.balance
            .checked_sub(amount)
            .ok_or(Rejection::InsufficientFunds)
    }
}

/// Amounts must be strictly positive and expressed in whole cents
fn validate_amount(amount: Decimal) -> Result<(), Rejection> {
    if amount <= Decimal::ZERO || amount.normalize().scale() > MONEY_SCALE {
        return Err(Rejection::InvalidAmount);
    }
    Ok(())
}
