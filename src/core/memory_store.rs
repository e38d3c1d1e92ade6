//! In-memory account store
//!
//! Keeps serialized records in a `BTreeMap` keyed by account number. It speaks
//! the same record format as the flat file, which makes it a drop-in store
//! for tests and dry runs.

use crate::core::traits::AccountStore;
use crate::io::record_format;
use crate::types::{Account, AccountNumber, LedgerError};
use std::collections::BTreeMap;

/// Account store backed by an ordered map of records
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: BTreeMap<AccountNumber, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, closed accounts included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AccountStore for MemoryStore {
    fn find(&self, number: AccountNumber) -> Result<Option<String>, LedgerError> {
        let Some(line) = self.records.get(&number) else {
            return Ok(None);
        };
        let account = record_format::decode(line)?;
        Ok(account.is_active().then(|| line.clone()))
    }

    fn upsert(&mut self, account: &Account, other: Option<&Account>) -> Result<(), LedgerError> {
        let first = record_format::encode(account)?;
        let second = other.map(record_format::encode).transpose()?;

        self.records.insert(account.number(), first);
        if let (Some(other), Some(line)) = (other, second) {
            self.records.insert(other.number(), line);
        }

        Ok(())
    }

    fn max_account_number(&self) -> Result<Option<AccountNumber>, LedgerError> {
        Ok(self.records.keys().next_back().copied())
    }

    fn records(&self) -> Result<Vec<String>, LedgerError> {
        Ok(self.records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdentityProfile;
    use rust_decimal::Decimal;

    fn account(number: AccountNumber) -> Account {
        Account::open(
            number,
            IdentityProfile::new(
                1111,
                20000101,
                4155550000,
                "Grace",
                "Hopper",
                "1 Navy Way",
                "Arlington",
                "VA",
                "22202",
            ),
        )
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.max_account_number().unwrap(), None);
        assert_eq!(store.find(100000000).unwrap(), None);
    }

    #[test]
    fn test_upsert_then_find() {
        let mut store = MemoryStore::new();
        let account = account(100000000);

        store.upsert(&account, None).unwrap();

        let line = store.find(100000000).unwrap().unwrap();
        assert_eq!(record_format::decode(&line).unwrap(), account);
    }

    #[test]
    fn test_upsert_replaces_both_sides() {
        let mut store = MemoryStore::new();
        let mut first = account(100000000);
        let mut second = account(100000001);
        store.upsert(&first, Some(&second)).unwrap();

        first.deposit(Decimal::new(500, 2)).unwrap();
        first.transfer(Some(&mut second), Decimal::new(200, 2)).unwrap();
        store.upsert(&first, Some(&second)).unwrap();

        assert_eq!(store.len(), 2);
        let stored = record_format::decode(&store.find(100000001).unwrap().unwrap()).unwrap();
        assert_eq!(stored.balance(), Decimal::new(200, 2));
        assert_eq!(store.max_account_number().unwrap(), Some(100000001));
    }

    #[test]
    fn test_closed_account_is_not_found_but_counts() {
        let mut store = MemoryStore::new();
        let mut account = account(100000005);
        account.close();
        store.upsert(&account, None).unwrap();

        assert_eq!(store.find(100000005).unwrap(), None);
        assert_eq!(store.max_account_number().unwrap(), Some(100000005));
        assert_eq!(store.records().unwrap().len(), 1);
    }
}
