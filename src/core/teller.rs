//! Teller service
//!
//! The [`Teller`] runs each ledger operation against an [`AccountStore`]:
//! load the latest record, authenticate, apply the operation on the entity,
//! and write the result back. Accounts are checked out for the span of one
//! call only, so there is never more than one live copy being mutated.
//!
//! Business rejections from the entity surface as
//! [`LedgerError::Rejected`]; nothing is written back in that case.

use crate::core::traits::AccountStore;
use crate::io::record_format;
use crate::types::{
    Account, AccountNumber, IdentityProfile, LedgerError, Pin, FIRST_ACCOUNT_NUMBER,
    MAX_ACCOUNT_NUMBER,
};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Valid phone numbers are exactly 10 digits without a leading zero
const PHONE_RANGE: std::ops::RangeInclusive<u64> = 1_000_000_000..=9_999_999_999;

/// New street, city, state and postal code for an address change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressChange {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Ledger operations over an account store
pub struct Teller<S: AccountStore> {
    store: S,
}

impl<S: AccountStore> Teller<S> {
    pub fn new(store: S) -> Self {
        Teller { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Open an account under the next free account number
    ///
    /// Numbers are `max(existing) + 1`, starting at [`FIRST_ACCOUNT_NUMBER`].
    pub fn open_account(&mut self, profile: IdentityProfile) -> Result<Account, LedgerError> {
        let number = match self.store.max_account_number()? {
            Some(last) if last >= MAX_ACCOUNT_NUMBER => {
                return Err(LedgerError::AccountNumbersExhausted { last })
            }
            Some(last) => (last + 1).max(FIRST_ACCOUNT_NUMBER),
            None => FIRST_ACCOUNT_NUMBER,
        };

        let account = Account::open(number, profile);
        self.store.upsert(&account, None)?;

        info!(account = number, "account opened");
        Ok(account)
    }

    /// Look up an active account
    pub fn lookup(&self, number: AccountNumber) -> Result<Option<Account>, LedgerError> {
        let record = self.store.find(number)?;
        Ok(record
            .map(|line| record_format::decode(&line))
            .transpose()?)
    }

    /// Look up an active account and check its PIN
    pub fn authenticate(&self, number: AccountNumber, pin: Pin) -> Result<Account, LedgerError> {
        let account = self
            .lookup(number)?
            .ok_or_else(|| LedgerError::account_not_found(number))?;

        if account.profile().pin() != pin {
            warn!(account = number, "PIN mismatch");
            return Err(LedgerError::authentication_failed(number));
        }

        Ok(account)
    }

    pub fn deposit(
        &mut self,
        number: AccountNumber,
        pin: Pin,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        let mut account = self.authenticate(number, pin)?;
        account.deposit(amount)?;
        self.store.upsert(&account, None)?;

        info!(account = number, %amount, "deposit applied");
        Ok(account)
    }

    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        pin: Pin,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        let mut account = self.authenticate(number, pin)?;
        account.withdraw(amount)?;
        self.store.upsert(&account, None)?;

        info!(account = number, %amount, "withdrawal applied");
        Ok(account)
    }

    /// Transfer between two accounts and persist both sides in one write
    ///
    /// A destination that is missing, closed, or the source itself is
    /// reported as [`crate::types::Rejection::AccountNotFound`].
    pub fn transfer(
        &mut self,
        number: AccountNumber,
        pin: Pin,
        destination: AccountNumber,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        let mut source = self.authenticate(number, pin)?;

        let mut target = if destination == number {
            None
        } else {
            self.lookup(destination)?
        };

        source.transfer(target.as_mut(), amount)?;
        self.store.upsert(&source, target.as_ref())?;

        info!(account = number, destination, %amount, "transfer applied");
        Ok(source)
    }

    pub fn change_pin(
        &mut self,
        number: AccountNumber,
        current: Pin,
        new_pin: Pin,
    ) -> Result<Account, LedgerError> {
        let mut account = self.authenticate(number, current)?;
        if !account.profile_mut().set_pin(current, new_pin) {
            return Err(LedgerError::PinNotChanged { account: number });
        }
        self.store.upsert(&account, None)?;

        info!(account = number, "PIN changed");
        Ok(account)
    }

    pub fn change_phone(
        &mut self,
        number: AccountNumber,
        pin: Pin,
        phone: u64,
    ) -> Result<Account, LedgerError> {
        if !PHONE_RANGE.contains(&phone) {
            return Err(LedgerError::InvalidPhone { phone });
        }
        let mut account = self.authenticate(number, pin)?;
        account.profile_mut().set_phone(phone);
        self.store.upsert(&account, None)?;

        info!(account = number, "phone changed");
        Ok(account)
    }

    /// Replace the whole address; an unrecognized state changes nothing
    pub fn change_address(
        &mut self,
        number: AccountNumber,
        pin: Pin,
        change: &AddressChange,
    ) -> Result<Account, LedgerError> {
        let mut account = self.authenticate(number, pin)?;
        let applied = account.profile_mut().update_address(
            &change.street_address,
            &change.city,
            &change.state,
            &change.zip,
        );
        if !applied {
            return Err(LedgerError::unrecognized_state(&change.state));
        }
        self.store.upsert(&account, None)?;

        info!(account = number, "address changed");
        Ok(account)
    }

    /// Mark an account closed; its record stays on file
    pub fn close(&mut self, number: AccountNumber, pin: Pin) -> Result<Account, LedgerError> {
        let mut account = self.authenticate(number, pin)?;
        account.close();
        self.store.upsert(&account, None)?;

        info!(account = number, "account closed");
        Ok(account)
    }

    /// All active accounts, sorted by number
    ///
    /// Malformed records are logged and skipped.
    pub fn active_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let mut accounts: Vec<Account> = self
            .store
            .records()?
            .iter()
            .enumerate()
            .filter_map(|(index, line)| match record_format::decode(line) {
                Ok(account) => Some(account),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping malformed account record");
                    None
                }
            })
            .filter(Account::is_active)
            .collect();

        accounts.sort_by_key(Account::number);
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory_store::MemoryStore;
    use crate::types::Rejection;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn profile(first: &str, pin: Pin) -> IdentityProfile {
        IdentityProfile::new(
            pin,
            19851026,
            7025550111,
            first,
            "Brown",
            "1640 Riverside Drive",
            "Hill Valley",
            "California",
            "95420",
        )
    }

    /// Teller with two funded accounts: 100000000 (PIN 1111) and 100000001 (PIN 2222)
    fn teller() -> Teller<MemoryStore> {
        let mut teller = Teller::new(MemoryStore::new());
        teller.open_account(profile("Emmett", 1111)).unwrap();
        teller.open_account(profile("Marty", 2222)).unwrap();
        teller.deposit(100000000, 1111, dec("500.00")).unwrap();
        teller.deposit(100000001, 2222, dec("50.00")).unwrap();
        teller
    }

    fn balance(teller: &Teller<MemoryStore>, number: AccountNumber) -> Decimal {
        teller.lookup(number).unwrap().unwrap().balance()
    }

    #[test]
    fn test_open_account_assigns_sequential_numbers() {
        let mut teller = Teller::new(MemoryStore::new());
        let first = teller.open_account(profile("A", 1)).unwrap();
        let second = teller.open_account(profile("B", 2)).unwrap();

        assert_eq!(first.number(), FIRST_ACCOUNT_NUMBER);
        assert_eq!(second.number(), FIRST_ACCOUNT_NUMBER + 1);
        assert_eq!(second.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_open_account_after_closed_account_does_not_reuse_number() {
        let mut teller = teller();
        teller.close(100000001, 2222).unwrap();

        let account = teller.open_account(profile("Doc", 3333)).unwrap();
        assert_eq!(account.number(), 100000002);
    }

    #[test]
    fn test_open_account_with_out_of_range_pin_stores_nothing() {
        let mut teller = Teller::new(MemoryStore::new());

        let result = teller.open_account(profile("Clara", crate::types::PIN_MAX + 1));

        assert!(matches!(
            result,
            Err(LedgerError::Record(crate::types::RecordError::FieldOverflow { field: "pin", .. }))
        ));
        assert!(teller.store().is_empty());
    }

    #[rstest]
    #[case::unknown_account(100000009, 1111, LedgerError::AccountNotFound { account: 100000009 })]
    #[case::wrong_pin(100000000, 9999, LedgerError::AuthenticationFailed { account: 100000000 })]
    fn test_authenticate_failures(
        #[case] number: AccountNumber,
        #[case] pin: Pin,
        #[case] expected: LedgerError,
    ) {
        let teller = teller();
        assert_eq!(teller.authenticate(number, pin), Err(expected));
    }

    #[test]
    fn test_deposit_and_withdraw_persist() {
        let mut teller = teller();

        let account = teller.withdraw(100000000, 1111, dec("120.25")).unwrap();
        assert_eq!(account.balance(), dec("379.75"));
        assert_eq!(balance(&teller, 100000000), dec("379.75"));
    }

    #[test]
    fn test_rejection_is_not_persisted() {
        let mut teller = teller();

        let result = teller.withdraw(100000000, 1111, dec("500.01"));

        assert_eq!(result, Err(LedgerError::Rejected(Rejection::InsufficientFunds)));
        assert_eq!(balance(&teller, 100000000), dec("500.00"));
    }

    #[test]
    fn test_transfer_persists_both_sides() {
        let mut teller = teller();

        let source = teller
            .transfer(100000000, 1111, 100000001, dec("200.00"))
            .unwrap();

        assert_eq!(source.balance(), dec("300.00"));
        assert_eq!(balance(&teller, 100000000), dec("300.00"));
        assert_eq!(balance(&teller, 100000001), dec("250.00"));
    }

    #[rstest]
    #[case::missing_destination(100000042)]
    #[case::self_transfer(100000000)]
    fn test_transfer_destination_not_found(#[case] destination: AccountNumber) {
        let mut teller = teller();

        let result = teller.transfer(100000000, 1111, destination, dec("10.00"));

        assert_eq!(result, Err(LedgerError::Rejected(Rejection::AccountNotFound)));
        assert_eq!(balance(&teller, 100000000), dec("500.00"));
    }

    #[test]
    fn test_transfer_to_closed_account_is_not_found() {
        let mut teller = teller();
        teller.close(100000001, 2222).unwrap();

        let result = teller.transfer(100000000, 1111, 100000001, dec("10.00"));
        assert_eq!(result, Err(LedgerError::Rejected(Rejection::AccountNotFound)));
    }

    #[test]
    fn test_change_pin() {
        let mut teller = teller();

        teller.change_pin(100000000, 1111, 4242).unwrap();

        assert!(teller.authenticate(100000000, 1111).is_err());
        assert!(teller.authenticate(100000000, 4242).is_ok());
        assert_eq!(
            teller.change_pin(100000000, 4242, 10000),
            Err(LedgerError::PinNotChanged { account: 100000000 })
        );
    }

    #[rstest]
    #[case::leading_zero(123456789)]
    #[case::too_long(12345678901)]
    fn test_change_phone_rejects_invalid_numbers(#[case] phone: u64) {
        let mut teller = teller();
        assert_eq!(
            teller.change_phone(100000000, 1111, phone),
            Err(LedgerError::InvalidPhone { phone })
        );
    }

    #[test]
    fn test_change_phone_persists() {
        let mut teller = teller();
        teller.change_phone(100000000, 1111, 8005550199).unwrap();
        let account = teller.lookup(100000000).unwrap().unwrap();
        assert_eq!(account.profile().phone(), 8005550199);
    }

    #[test]
    fn test_change_address() {
        let mut teller = teller();
        let change = AddressChange {
            street_address: "9303 Lyon Drive".to_string(),
            city: "Hill Valley".to_string(),
            state: "ca".to_string(),
            zip: "95421".to_string(),
        };

        let account = teller.change_address(100000000, 1111, &change).unwrap();
        assert_eq!(account.profile().street_address(), "9303 Lyon Drive");
        assert_eq!(account.profile().state(), "CA");

        let bad = AddressChange {
            state: "Atlantis".to_string(),
            ..change
        };
        assert_eq!(
            teller.change_address(100000000, 1111, &bad),
            Err(LedgerError::unrecognized_state("Atlantis"))
        );
    }

    #[test]
    fn test_close_hides_account() {
        let mut teller = teller();

        let closed = teller.close(100000001, 2222).unwrap();

        assert!(!closed.is_active());
        assert_eq!(teller.lookup(100000001).unwrap(), None);
        assert_eq!(teller.store().len(), 2);
        let active: Vec<AccountNumber> = teller
            .active_accounts()
            .unwrap()
            .iter()
            .map(Account::number)
            .collect();
        assert_eq!(active, vec![100000000]);
    }
}
