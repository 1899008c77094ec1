use chrono::{Duration as ChronoDuration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// Storage format for timestamps, local civil time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date format used for history lookups and daily log files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Clock face shown to people, e.g. `09:00 AM`.
pub const CLOCK_FORMAT: &str = "%I:%M %p";

/// Current local civil time at second granularity.
#[must_use]
pub fn local_now() -> NaiveDateTime {
    to_second(chrono::Local::now().naive_local())
}

/// Drop sub-second precision so a time survives the storage formats unchanged.
#[must_use]
pub fn to_second(time: NaiveDateTime) -> NaiveDateTime {
    time.with_nanosecond(0).unwrap_or(time)
}

#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// # Errors
///
/// Will return `Err` if `s` is not in `YYYY-MM-DD HH:MM:SS` form
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TrackerError> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| TrackerError::invalid(format!("bad timestamp '{s}': {e}")))
}

#[must_use]
pub fn format_clock(ts: &NaiveDateTime) -> String {
    ts.format(CLOCK_FORMAT).to_string()
}

/// Time on course in whole seconds. Never negative.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(try_from = "String", into = "String")]
pub struct Elapsed(u64);

impl Elapsed {
    /// Span from `start` to `end`; an `end` before `start` gives zero.
    #[must_use]
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::from_duration(end - start)
    }

    #[must_use]
    pub fn from_duration(td: ChronoDuration) -> Self {
        Self(u64::try_from(td.num_seconds()).unwrap_or(0))
    }

    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub fn as_secs(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> ChronoDuration {
        ChronoDuration::seconds(i64::try_from(self.0).unwrap_or(i64::MAX))
    }

    #[must_use]
    pub fn whole_minutes(self) -> u64 {
        self.0 / 60
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MINUTE: u64 = 60;
        const HOUR: u64 = 60 * MINUTE;

        let hours = self.0 / HOUR;
        let minutes = (self.0 % HOUR) / MINUTE;
        let seconds = self.0 % MINUTE;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for Elapsed {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TrackerError::invalid(format!("elapsed time must look like HH:MM:SS, got '{s}'"));
        let mut parts = s.trim().split(':');
        let (Some(h), Some(m), Some(sec), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };
        let hours: u64 = h.parse().map_err(|_| bad())?;
        let minutes: u64 = m.parse().map_err(|_| bad())?;
        let seconds: u64 = sec.parse().map_err(|_| bad())?;
        if minutes > 59 || seconds > 59 || m.len() != 2 || sec.len() != 2 {
            return Err(bad());
        }
        hours
            .checked_mul(3600)
            .and_then(|secs| secs.checked_add(minutes * 60 + seconds))
            .map(Self)
            .ok_or_else(bad)
    }
}

impl TryFrom<String> for Elapsed {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Elapsed> for String {
    fn from(value: Elapsed) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 14)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid test time")
    }

    #[test]
    fn elapsed_is_zero_padded() {
        assert_eq!(Elapsed::between(at(9, 0, 0), at(11, 30, 0)).to_string(), "02:30:00");
        assert_eq!(Elapsed::between(at(9, 0, 0), at(9, 0, 7)).to_string(), "00:00:07");
    }

    #[test]
    fn negative_span_clamps_to_zero() {
        assert_eq!(Elapsed::between(at(11, 0, 0), at(9, 0, 0)).to_string(), "00:00:00");
    }

    #[test]
    fn hours_grow_past_two_digits() {
        assert_eq!(Elapsed::from_secs(123 * 3600 + 61).to_string(), "123:01:01");
        assert_eq!("123:01:01".parse::<Elapsed>().ok(), Some(Elapsed::from_secs(123 * 3600 + 61)));
    }

    #[test]
    fn elapsed_rejects_garbage() {
        assert!("2:30".parse::<Elapsed>().is_err());
        assert!("02:61:00".parse::<Elapsed>().is_err());
        assert!("aa:bb:cc".parse::<Elapsed>().is_err());
    }

    #[test]
    fn elapsed_overflow_is_an_error() {
        assert!("99999999999999999:00:00".parse::<Elapsed>().is_err());
        assert!(format!("{}:00:15", u64::MAX / 3600).parse::<Elapsed>().is_ok());
        assert!(format!("{}:00:16", u64::MAX / 3600).parse::<Elapsed>().is_err());
    }

    #[test]
    fn to_second_drops_fraction() {
        let fractional = at(9, 0, 0) + ChronoDuration::milliseconds(700);
        assert_eq!(to_second(fractional), at(9, 0, 0));
    }

    #[test]
    fn clock_face_uses_am_pm() {
        assert_eq!(format_clock(&at(14, 5, 0)), "02:05 PM");
        assert_eq!(format_clock(&at(9, 0, 0)), "09:00 AM");
    }
}
