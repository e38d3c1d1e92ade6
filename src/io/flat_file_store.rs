//! Flat-file account store
//!
//! The backing file holds one fixed-width record per line, with no header.
//! A missing file is treated as an empty store. Writes rebuild the whole
//! file in a sibling temporary file and rename it over the original.
//!
//! Lines that do not decode are skipped by lookups and logged, but they are
//! written back untouched so that nothing on file is silently dropped.

use crate::core::traits::AccountStore;
use crate::io::record_format;
use crate::types::{Account, AccountNumber, LedgerError};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Account store backed by a text file
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlatFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_lines(&self) -> Result<Vec<String>, LedgerError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "account file missing, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_lines(&self, lines: &[String]) -> Result<(), LedgerError> {
        let mut contents = lines.join("\n");
        contents.push('\n');

        let mut temp_name = OsString::from(self.path.as_os_str());
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl AccountStore for FlatFileStore {
    fn find(&self, number: AccountNumber) -> Result<Option<String>, LedgerError> {
        for (index, line) in self.read_lines()?.into_iter().enumerate() {
            if record_format::account_number_of(&line) != Some(number) {
                continue;
            }
            match record_format::decode(&line) {
                Ok(account) if account.is_active() => return Ok(Some(line)),
                Ok(_) => {}
                Err(e) => warn!(line = index + 1, error = %e, "skipping malformed account record"),
            }
        }
        Ok(None)
    }

    fn upsert(&mut self, account: &Account, other: Option<&Account>) -> Result<(), LedgerError> {
        let mut pending = vec![(account.number(), record_format::encode(account)?)];
        if let Some(other) = other {
            pending.push((other.number(), record_format::encode(other)?));
        }

        let mut lines = self.read_lines()?;
        for (number, record) in pending {
            match lines
                .iter_mut()
                .find(|line| record_format::account_number_of(line) == Some(number))
            {
                Some(line) => *line = record,
                None => lines.push(record),
            }
        }

        self.write_lines(&lines)?;
        debug!(path = %self.path.display(), records = lines.len(), "account file rewritten");
        Ok(())
    }

    fn max_account_number(&self) -> Result<Option<AccountNumber>, LedgerError> {
        Ok(self
            .read_lines()?
            .iter()
            .filter_map(|line| record_format::account_number_of(line))
            .max())
    }

    fn records(&self) -> Result<Vec<String>, LedgerError> {
        self.read_lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdentityProfile;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn account(number: AccountNumber) -> Account {
        Account::open(
            number,
            IdentityProfile::new(
                2468,
                19691120,
                3035550142,
                "Linus",
                "Torvalds",
                "4 Kernel Court",
                "Portland",
                "oregon",
                "97201",
            ),
        )
    }

    fn store_in(dir: &TempDir) -> FlatFileStore {
        FlatFileStore::new(dir.path().join("accounts-db.txt"))
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.find(100000000).unwrap(), None);
        assert_eq!(store.max_account_number().unwrap(), None);
        assert!(store.records().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_appends_then_replaces() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut first = account(100000000);
        let second = account(100000001);

        store.upsert(&first, None).unwrap();
        store.upsert(&second, None).unwrap();
        first.deposit(Decimal::new(1999, 2)).unwrap();
        store.upsert(&first, None).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1000000002468"));
        assert!(lines[0][13..28].starts_with("19.99"));
        assert!(lines[1].starts_with("100000001"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_find_skips_closed_and_malformed_records() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut closed = account(100000002);
        closed.close();
        store.upsert(&closed, None).unwrap();

        let mut contents = fs::read_to_string(store.path()).unwrap();
        contents.push_str("100000003 this line is far too short\n");
        fs::write(store.path(), contents).unwrap();

        assert_eq!(store.find(100000002).unwrap(), None);
        assert_eq!(store.find(100000003).unwrap(), None);
        assert_eq!(store.max_account_number().unwrap(), Some(100000003));
    }

    #[test]
    fn test_upsert_keeps_unrelated_lines() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        fs::write(store.path(), "garbage\n").unwrap();

        store.upsert(&account(100000000), None).unwrap();

        let records = store.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], "garbage");
    }

    #[test]
    fn test_upsert_encoding_failure_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.upsert(&account(100000000), None).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let result = store.upsert(&account(100000000), Some(&account(1_000_000_000)));

        assert!(matches!(result, Err(LedgerError::Record(_))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }
}
