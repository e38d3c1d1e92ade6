//! Fixed-width account record format
//!
//! Every account persists as one line of exactly [`RECORD_WIDTH`] characters
//! with no delimiters; columns are purely positional. The column order and
//! widths come from [`RECORD_LAYOUT`], and offsets are derived from it, so a
//! width change in one place moves every later column consistently.
//!
//! | column          | width | rendering                           |
//! |-----------------|-------|-------------------------------------|
//! | account number  | 9     | zero-padded                         |
//! | PIN             | 4     | zero-padded                         |
//! | balance         | 15    | two decimals, left-justified        |
//! | last name       | 20    | left-justified, space-padded        |
//! | first name      | 15    | left-justified, space-padded        |
//! | date of birth   | 8     | `YYYYMMDD`                          |
//! | phone           | 10    | digits                              |
//! | street address  | 30    | left-justified, space-padded        |
//! | city            | 30    | left-justified, space-padded        |
//! | state           | 2     | abbreviation                        |
//! | postal code     | 5     | left-justified                      |
//! | status          | 1     | `Y` active, `N` closed              |
//!
//! Widths are counted in characters. Text longer than its column is cut to
//! fit when encoding, so callers must check lengths first if they need the
//! value back unchanged.

use crate::types::{
    Account, AccountNumber, AccountStatus, IdentityProfile, RecordError, ACCOUNT_MAXIMUM,
    MONEY_SCALE,
};
use rust_decimal::Decimal;
use std::str::FromStr;

/// A column of the fixed-width record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AccountNumber,
    Pin,
    Balance,
    LastName,
    FirstName,
    DateOfBirth,
    Phone,
    StreetAddress,
    City,
    State,
    Zip,
    Status,
}

/// Column order, left to right
pub const RECORD_LAYOUT: [Field; 12] = [
    Field::AccountNumber,
    Field::Pin,
    Field::Balance,
    Field::LastName,
    Field::FirstName,
    Field::DateOfBirth,
    Field::Phone,
    Field::StreetAddress,
    Field::City,
    Field::State,
    Field::Zip,
    Field::Status,
];

/// Total characters per record
pub const RECORD_WIDTH: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < RECORD_LAYOUT.len() {
        total += RECORD_LAYOUT[i].width();
        i += 1;
    }
    total
};

impl Field {
    pub const fn width(self) -> usize {
        match self {
            Field::AccountNumber => 9,
            Field::Pin => 4,
            Field::Balance => 15,
            Field::LastName => 20,
            Field::FirstName => 15,
            Field::DateOfBirth => 8,
            Field::Phone => 10,
            Field::StreetAddress => 30,
            Field::City => 30,
            Field::State => 2,
            Field::Zip => 5,
            Field::Status => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Field::AccountNumber => "account_number",
            Field::Pin => "pin",
            Field::Balance => "balance",
            Field::LastName => "last_name",
            Field::FirstName => "first_name",
            Field::DateOfBirth => "date_of_birth",
            Field::Phone => "phone",
            Field::StreetAddress => "street_address",
            Field::City => "city",
            Field::State => "state",
            Field::Zip => "zip",
            Field::Status => "status",
        }
    }

    /// Character offset of the column's first position
    pub fn offset(self) -> usize {
        RECORD_LAYOUT
            .iter()
            .take_while(|field| **field != self)
            .map(|field| field.width())
            .sum()
    }
}

/// Render an account as one fixed-width line (without a line terminator)
///
/// # Errors
///
/// Returns [`RecordError::FieldOverflow`] if a numeric value has more digits
/// than its column allows, and [`RecordError::ControlCharacter`] if a text
/// value holds a line break or other control character. Text that is merely
/// too long is truncated.
pub fn encode(account: &Account) -> Result<String, RecordError> {
    let mut line = String::with_capacity(RECORD_WIDTH);
    for field in RECORD_LAYOUT {
        line.push_str(&render(field, account)?);
    }
    Ok(line)
}

fn render(field: Field, account: &Account) -> Result<String, RecordError> {
    let profile = account.profile();
    match field {
        Field::AccountNumber => numeric(field, account.number()),
        Field::Pin => numeric(field, u64::from(profile.pin())),
        Field::Balance => {
            let value = format!("{:.2}", account.balance());
            fit(field, value).map(|value| text(field, &value))
        }
        Field::LastName => printable(field, profile.last_name()),
        Field::FirstName => printable(field, profile.first_name()),
        Field::DateOfBirth => numeric(field, u64::from(profile.dob())),
        Field::Phone => numeric(field, profile.phone()),
        Field::StreetAddress => printable(field, profile.street_address()),
        Field::City => printable(field, profile.city()),
        Field::State => printable(field, profile.state()),
        Field::Zip => printable(field, profile.zip()),
        Field::Status => Ok(account.status().as_char().to_string()),
    }
}

fn numeric(field: Field, value: u64) -> Result<String, RecordError> {
    fit(field, format!("{:0width$}", value, width = field.width()))
}

fn fit(field: Field, value: String) -> Result<String, RecordError> {
    if value.chars().count() > field.width() {
        return Err(RecordError::FieldOverflow {
            field: field.name(),
            width: field.width(),
            value,
        });
    }
    Ok(value)
}

fn printable(field: Field, value: &str) -> Result<String, RecordError> {
    if value.chars().any(char::is_control) {
        return Err(RecordError::ControlCharacter {
            field: field.name(),
            value: value.to_string(),
        });
    }
    Ok(text(field, value))
}

/// Left-justify, pad with spaces and cut to the column width
fn text(field: Field, value: &str) -> String {
    format!("{:<width$.width$}", value, width = field.width())
}

/// Parse one fixed-width line into an account
///
/// Text columns have their trailing padding removed. Numeric columns must be
/// all ASCII digits; the left-justified balance column is the only numeric
/// column whose trailing spaces are stripped before parsing.
///
/// # Errors
///
/// Fails on the first structural problem; no partial account is returned.
pub fn decode(line: &str) -> Result<Account, RecordError> {
    let columns = Columns::split(line)?;

    let number = columns.number::<AccountNumber>(Field::AccountNumber)?;
    let pin = columns.number(Field::Pin)?;
    let balance = columns.balance()?;
    let dob = columns.number(Field::DateOfBirth)?;
    let phone = columns.number(Field::Phone)?;
    let status = columns.status()?;

    let profile = IdentityProfile::new(
        pin,
        dob,
        phone,
        columns.text(Field::FirstName),
        columns.text(Field::LastName),
        columns.text(Field::StreetAddress),
        columns.text(Field::City),
        &columns.text(Field::State),
        columns.text(Field::Zip),
    );

    Account::restore(status, number, balance, profile).ok_or_else(|| RecordError::InvalidBalance {
        value: balance.to_string(),
    })
}

/// Account number of a record, without decoding the rest of the line
pub fn account_number_of(line: &str) -> Option<AccountNumber> {
    let raw: String = line.chars().take(Field::AccountNumber.width()).collect();
    if raw.chars().count() != Field::AccountNumber.width() || !is_digits(&raw) {
        return None;
    }
    raw.parse().ok()
}

fn is_digits(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit())
}

struct Columns {
    chars: Vec<char>,
}

impl Columns {
    fn split(line: &str) -> Result<Self, RecordError> {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() != RECORD_WIDTH {
            return Err(RecordError::WrongLength {
                expected: RECORD_WIDTH,
                actual: chars.len(),
            });
        }
        Ok(Columns { chars })
    }

    fn raw(&self, field: Field) -> String {
        let start = field.offset();
        self.chars[start..start + field.width()].iter().collect()
    }

    fn text(&self, field: Field) -> String {
        self.raw(field).trim_end().to_string()
    }

    fn number<T: FromStr>(&self, field: Field) -> Result<T, RecordError> {
        let raw = self.raw(field);
        let invalid = || RecordError::InvalidNumber {
            field: field.name(),
            value: raw.clone(),
        };
        if !is_digits(&raw) {
            return Err(invalid());
        }
        raw.parse().map_err(|_| invalid())
    }

    fn balance(&self) -> Result<Decimal, RecordError> {
        let raw = self.raw(Field::Balance);
        let invalid = || RecordError::InvalidBalance { value: raw.clone() };
        let digits = raw.trim_end();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return Err(invalid());
        }
        let balance = Decimal::from_str(digits).map_err(|_| invalid())?;
        if balance > ACCOUNT_MAXIMUM || balance.normalize().scale() > MONEY_SCALE {
            return Err(invalid());
        }
        Ok(balance)
    }

    fn status(&self) -> Result<AccountStatus, RecordError> {
        let flag = self.chars[Field::Status.offset()];
        AccountStatus::from_char(flag).ok_or(RecordError::InvalidStatus { status: flag })
    }
}
