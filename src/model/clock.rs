use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::TrackerError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        })
    }
}

impl FromStr for Meridiem {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Meridiem::Am),
            "PM" => Ok(Meridiem::Pm),
            _ => Err(TrackerError::invalid(format!("expected AM or PM, got '{s}'"))),
        }
    }
}

/// A wall-clock time typed in by hand, applied to the current calendar day.
///
/// The hour is read on a 12-hour dial: it is taken modulo 12 and PM adds 12,
/// so `12 AM` is midnight and `12 PM` is noon. Seconds are always zero.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManualTime {
    hour: u32,
    minute: u32,
}

impl ManualTime {
    /// Build from the raw text of the hour and minute fields.
    ///
    /// # Errors
    ///
    /// Will return `Err` if either field is not all digits, the hour is above
    /// 12 or the minute is above 59
    pub fn parse(hour: &str, minute: &str, meridiem: Meridiem) -> Result<Self, TrackerError> {
        let hour = hour.trim();
        let minute = minute.trim();
        let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !digits(hour) || !digits(minute) {
            return Err(TrackerError::invalid(format!(
                "manual time needs numeric hour and minute, got '{hour}:{minute}'"
            )));
        }
        let h: u32 = hour
            .parse()
            .map_err(|_| TrackerError::invalid(format!("hour out of range: '{hour}'")))?;
        let m: u32 = minute
            .parse()
            .map_err(|_| TrackerError::invalid(format!("minute out of range: '{minute}'")))?;
        if h > 12 {
            return Err(TrackerError::invalid(format!("hour must be 0-12, got {h}")));
        }
        if m > 59 {
            return Err(TrackerError::invalid(format!("minute must be 0-59, got {m}")));
        }
        let mut hour_24 = h % 12;
        if meridiem == Meridiem::Pm {
            hour_24 += 12;
        }
        Ok(Self {
            hour: hour_24,
            minute: m,
        })
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        self.hour
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        self.minute
    }

    /// The same wall-clock time on `date`.
    #[must_use]
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        // hour < 24 and minute < 60 hold by construction
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN);
        date.and_time(time)
    }
}

fn compact_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*(am|pm)\s*$").expect("time regex compiles")
    })
}

/// Accepts the compact `9:30 PM` form.
impl FromStr for ManualTime {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = compact_time_regex()
            .captures(s)
            .ok_or_else(|| TrackerError::invalid(format!("expected a time like '9:30 AM', got '{s}'")))?;
        let meridiem: Meridiem = caps[3].parse()?;
        Self::parse(&caps[1], &caps[2], meridiem)
    }
}

impl fmt::Display for ManualTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meridiem = if self.hour >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let dial = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{dial}:{:02} {meridiem}", self.minute)
    }
}

/// Where the start or end time of an action comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeSource {
    #[default]
    Now,
    Manual(ManualTime),
}

impl TimeSource {
    /// Resolve against the caller's notion of now. Manual times land on the
    /// same calendar day as `now`, even when that puts them in the past.
    #[must_use]
    pub fn resolve(self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            TimeSource::Now => now,
            TimeSource::Manual(t) => t.on(now.date()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date")
    }

    #[test]
    fn pm_adds_twelve_hours() {
        let t = ManualTime::parse("2", "05", Meridiem::Pm).expect("valid manual time");
        assert_eq!((t.hour(), t.minute()), (14, 5));
    }

    #[test]
    fn twelve_wraps_on_the_dial() {
        let midnight = ManualTime::parse("12", "00", Meridiem::Am).expect("valid");
        let noon = ManualTime::parse("12", "00", Meridiem::Pm).expect("valid");
        assert_eq!(midnight.hour(), 0);
        assert_eq!(noon.hour(), 12);
        assert_eq!(noon.to_string(), "12:00 PM");
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        assert!(ManualTime::parse("nine", "30", Meridiem::Am).is_err());
        assert!(ManualTime::parse("9", "", Meridiem::Am).is_err());
        assert!(ManualTime::parse("-9", "30", Meridiem::Am).is_err());
        assert!(ManualTime::parse("9", "75", Meridiem::Am).is_err());
        assert!(ManualTime::parse("13", "00", Meridiem::Pm).is_err());
    }

    #[test]
    fn compact_form_parses() {
        let t: ManualTime = " 9:30 pm ".parse().expect("valid compact time");
        assert_eq!((t.hour(), t.minute()), (21, 30));
        assert!("930".parse::<ManualTime>().is_err());
    }

    #[test]
    fn manual_time_uses_todays_date() {
        let now = today().and_hms_opt(15, 0, 0).expect("valid");
        let t = ManualTime::parse("9", "00", Meridiem::Am).expect("valid");
        let resolved = TimeSource::Manual(t).resolve(now);
        assert_eq!(resolved, today().and_hms_opt(9, 0, 0).expect("valid"));
        assert_eq!(TimeSource::Now.resolve(now), now);
    }
}
