//! # Lookup Tables
//!
//! Fixed choice lists for the reservation forms.

use std::fmt;

/// Largest numeric party size offered before the "Festa" option.
pub const MAX_PARTY_SIZE: u8 = 20;

/// One half-hour slot of the day, `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub value: String,
    pub label: String,
}

/// What a reservation is for: a number of guests, or a party booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartySize {
    Guests(u8),
    Party,
}

impl PartySize {
    pub fn label(self) -> String {
        match self {
            PartySize::Guests(n) => format!("{n} pessoas"),
            PartySize::Party => "Festa".to_string(),
        }
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartySize::Guests(n) => write!(f, "{n}"),
            PartySize::Party => write!(f, "festa"),
        }
    }
}

/// 48 slots from 00:00 to 23:30, in order.
pub fn time_slots() -> Vec<TimeSlot> {
    (0..48)
        .map(|i| {
            let value = format!("{:02}:{}", i / 2, if i % 2 == 0 { "00" } else { "30" });
            TimeSlot {
                label: value.clone(),
                value,
            }
        })
        .collect()
}

/// Party sizes 1 through 20, then the party sentinel.
pub fn party_sizes() -> Vec<PartySize> {
    (1..=MAX_PARTY_SIZE)
        .map(PartySize::Guests)
        .chain(std::iter::once(PartySize::Party))
        .collect()
}
