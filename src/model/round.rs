use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::TrackerError;
use crate::model::attributes::RoundAttributes;
use crate::model::utils::{Elapsed, format_clock};

/// Stable identifier handed out when a round starts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RoundId(Uuid);

impl RoundId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoundId {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| TrackerError::invalid(format!("bad round id '{s}': {e}")))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Ended,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub id: RoundId,
    pub golfer_name: String,
    pub attributes: RoundAttributes,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub elapsed: Option<Elapsed>,
}

impl Round {
    #[must_use]
    pub fn begin(golfer_name: String, attributes: RoundAttributes, start_time: NaiveDateTime) -> Self {
        Self {
            id: RoundId::new(),
            golfer_name,
            attributes,
            start_time,
            end_time: None,
            elapsed: None,
        }
    }

    /// Stamp the end time. The elapsed span is clamped at zero.
    #[must_use]
    pub fn finish(mut self, end_time: NaiveDateTime) -> Self {
        self.elapsed = Some(Elapsed::between(self.start_time, end_time));
        self.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        if self.end_time.is_none() {
            RoundStatus::Active
        } else {
            RoundStatus::Ended
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == RoundStatus::Active
    }

    /// Time on course as of `now`, or the recorded span once ended.
    #[must_use]
    pub fn elapsed_at(&self, now: NaiveDateTime) -> Elapsed {
        match self.elapsed {
            Some(elapsed) => elapsed,
            None => Elapsed::between(self.start_time, now),
        }
    }

    /// True when an active round has been out longer than its hole count allows.
    #[must_use]
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        match self.attributes.holes {
            Some(holes) if self.is_active() => self.elapsed_at(now).as_duration() > holes.pace_limit(),
            _ => false,
        }
    }

    /// Calendar day the round belongs to in history.
    #[must_use]
    pub fn history_date(&self) -> NaiveDate {
        self.end_time.unwrap_or(self.start_time).date()
    }

    /// One-line rendering: `Alice | 2 | Cart | 09:00 AM | 11:30 AM | 02:30:00`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let end = self.end_time.as_ref().map_or_else(|| "-".to_string(), format_clock);
        let elapsed = self.elapsed.map_or_else(|| "-".to_string(), |e| e.to_string());
        format!(
            "{} | {} | {} | {} | {} | {}",
            self.golfer_name,
            self.attributes.group_size,
            self.attributes.transport,
            format_clock(&self.start_time),
            end,
            elapsed
        )
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ActiveRoundView {
    pub round: Round,
    pub elapsed: Elapsed,
    pub overdue: bool,
}

impl ActiveRoundView {
    #[must_use]
    pub fn at(round: Round, now: NaiveDateTime) -> Self {
        let elapsed = round.elapsed_at(now);
        let overdue = round.is_overdue(now);
        Self {
            round,
            elapsed,
            overdue,
        }
    }

    /// One-line rendering of a round still on course: `Alice | 2 | Cart | 09:00 AM | 00:10:00`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} | {} | {} | {} | {}",
            self.round.golfer_name,
            self.round.attributes.group_size,
            self.round.attributes.transport,
            format_clock(&self.round.start_time),
            self.elapsed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupSize, TransportMode};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 14)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("valid test time")
    }

    fn alice() -> Round {
        let attrs = RoundAttributes::new(GroupSize::new(2).expect("valid group"), TransportMode::Cart);
        Round::begin("Alice".to_string(), attrs, at(9, 0))
    }

    #[test]
    fn active_line_has_no_end_columns() {
        let view = ActiveRoundView::at(alice(), at(9, 10));
        assert_eq!(view.summary_line(), "Alice | 2 | Cart | 09:00 AM | 00:10:00");
    }

    #[test]
    fn ended_line_has_end_and_elapsed() {
        let ended = alice().finish(at(11, 30));
        assert_eq!(ended.summary_line(), "Alice | 2 | Cart | 09:00 AM | 11:30 AM | 02:30:00");
    }
}
