//! Identity profile embedded in every account
//!
//! The profile carries the account holder's personal information. State is
//! always held as an uppercase two-letter abbreviation; text that matches
//! neither an abbreviation nor a full state name collapses to an empty string.

use chrono::NaiveDate;

/// Four-digit personal identification number (0-9999)
pub type Pin = u16;

/// Largest PIN that fits the four-digit column
pub const PIN_MAX: Pin = 9999;

/// The 50 states plus the federal district, as (lowercase name, abbreviation)
pub const STATES: [(&str, &str); 51] = [
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
    ("district of columbia", "DC"),
];

/// Resolve a state abbreviation or full state name (case-insensitive)
///
/// Returns `None` for anything outside the reference list.
pub fn abbreviate_state(text: &str) -> Option<&'static str> {
    let needle = text.to_lowercase();
    STATES
        .iter()
        .find(|(name, abbreviation)| {
            *name == needle || abbreviation.eq_ignore_ascii_case(&needle)
        })
        .map(|(_, abbreviation)| *abbreviation)
}

/// Personal information owned by exactly one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pin: Pin,
    dob: u32,
    phone: u64,
    first_name: String,
    last_name: String,
    street_address: String,
    city: String,
    state: String,
    zip: String,
}

impl IdentityProfile {
    /// Create a profile, normalising `state` to its abbreviation
    ///
    /// `dob` is encoded as `YYYYMMDD`. `pin` is not range-checked here: callers
    /// must pass a value no greater than [`PIN_MAX`], otherwise the account
    /// fails to encode with [`crate::types::RecordError::FieldOverflow`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pin: Pin,
        dob: u32,
        phone: u64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        street_address: impl Into<String>,
        city: impl Into<String>,
        state: &str,
        zip: impl Into<String>,
    ) -> Self {
        IdentityProfile {
            pin,
            dob,
            phone,
            first_name: first_name.into(),
            last_name: last_name.into(),
            street_address: street_address.into(),
            city: city.into(),
            state: abbreviate_state(state).unwrap_or_default().to_string(),
            zip: zip.into(),
        }
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn dob(&self) -> u32 {
        self.dob
    }

    pub fn phone(&self) -> u64 {
        self.phone
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn street_address(&self) -> &str {
        &self.street_address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    /// Change the PIN
    ///
    /// Applies only when `current` matches the stored PIN and `new_pin` is at
    /// most [`PIN_MAX`]. Returns whether the stored PIN now equals `new_pin`
    /// as a result of this call; a refused change leaves the PIN untouched.
    pub fn set_pin(&mut self, current: Pin, new_pin: Pin) -> bool {
        if new_pin > PIN_MAX || self.pin != current {
            return false;
        }
        self.pin = new_pin;
        true
    }

    pub fn set_phone(&mut self, phone: u64) {
        self.phone = phone;
    }

    pub fn set_street_address(&mut self, street_address: impl Into<String>) {
        self.street_address = street_address.into();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }

    /// Set the state from an abbreviation or a full name
    ///
    /// Unrecognized text stores an empty string; the return value is `false`
    /// in that case so callers can tell the data was dropped.
    pub fn set_state(&mut self, text: &str) -> bool {
        match abbreviate_state(text) {
            Some(abbreviation) => {
                self.state = abbreviation.to_string();
                true
            }
            None => {
                self.state.clear();
                false
            }
        }
    }

    pub fn set_zip(&mut self, zip: impl Into<String>) {
        self.zip = zip.into();
    }

    /// Replace street, city, state and postal code together
    ///
    /// Nothing changes unless `state` is recognized.
    pub fn update_address(&mut self, street_address: &str, city: &str, state: &str, zip: &str) -> bool {
        if abbreviate_state(state).is_none() {
            return false;
        }
        self.set_street_address(street_address);
        self.set_city(city);
        self.set_zip(zip);
        self.set_state(state)
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Phone rendered as `(555) 555-5555`
    pub fn formatted_phone(&self) -> String {
        format!(
            "({:03}) {:03}-{:04}",
            self.phone / 10_000_000,
            (self.phone / 10_000) % 1000,
            self.phone % 10_000
        )
    }

    /// Date of birth rendered as `January 5, 1990`
    ///
    /// Falls back to the raw digits when they do not form a calendar date.
    pub fn formatted_dob(&self) -> String {
        let (year, month, day) = (self.dob / 10_000, (self.dob / 100) % 100, self.dob % 100);
        NaiveDate::from_ymd_opt(year as i32, month, day)
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| self.dob.to_string())
    }

    /// "City, ST 12345"
    pub fn formatted_address(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip)
    }
}
