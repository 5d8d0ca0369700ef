//! Reservation requests. They are only logged and acknowledged; nothing is stored.

use chrono::NaiveDate;

use crate::core::lookup::PartySize;

/// Date format accepted by the reservation forms.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Restaurant name typed into the home form, or the detail page's restaurant.
    pub restaurant: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub party: PartySize,
}

impl Reservation {
    /// Short human-readable summary for the status bar.
    pub fn summary(&self) -> String {
        let when = format!("{} às {}", self.date.format("%d/%m/%Y"), self.time);
        match &self.restaurant {
            Some(name) => format!("{name}, {when}, {}", self.party.label()),
            None => format!("{when}, {}", self.party.label()),
        }
    }
}

/// Parses a form date. Blank input is "no date chosen".
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map(Some)
}
