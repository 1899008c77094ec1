#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use golf_round_tracker::model::{GroupSize, Holes, RoundAttributes, TransportMode};

pub fn test_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid test date")
}

/// `hh:mm:ss` on the fixed test day.
pub fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    test_day()
        .and_hms_opt(hour, minute, second)
        .expect("valid test time")
}

pub fn group(players: u8, transport: TransportMode) -> RoundAttributes {
    RoundAttributes::new(GroupSize::new(players).expect("valid group size"), transport)
}

pub fn eighteen_in_cart(players: u8) -> RoundAttributes {
    group(players, TransportMode::Cart).with_holes(Holes::Eighteen)
}
