use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

pub const MIN_GROUP_SIZE: u8 = 1;
pub const MAX_GROUP_SIZE: u8 = 6;

/// Number of players in the group, always within 1..=6.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct GroupSize(u8);

impl GroupSize {
    /// # Errors
    ///
    /// Will return `Err` if `players` is outside 1..=6
    pub fn new(players: u8) -> Result<Self, TrackerError> {
        if (MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&players) {
            Ok(Self(players))
        } else {
            Err(TrackerError::invalid(format!(
                "group size must be between {MIN_GROUP_SIZE} and {MAX_GROUP_SIZE}, got {players}"
            )))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for GroupSize {
    fn default() -> Self {
        Self(MIN_GROUP_SIZE)
    }
}

impl TryFrom<u8> for GroupSize {
    type Error = TrackerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroupSize> for u8 {
    fn from(value: GroupSize) -> Self {
        value.0
    }
}

impl FromStr for GroupSize {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let players = s
            .trim()
            .parse::<u8>()
            .map_err(|_| TrackerError::invalid(format!("group size is not a number: '{s}'")))?;
        Self::new(players)
    }
}

impl fmt::Display for GroupSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransportMode {
    Walking,
    #[default]
    Cart,
}

impl TransportMode {
    pub const ALL: [TransportMode; 2] = [TransportMode::Cart, TransportMode::Walking];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walking => "Walking",
            TransportMode::Cart => "Cart",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" => Ok(TransportMode::Walking),
            "cart" => Ok(TransportMode::Cart),
            _ => Err(TrackerError::invalid(format!("unknown transport mode: '{s}'"))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Holes {
    Nine,
    Eighteen,
}

impl Holes {
    pub const ALL: [Holes; 2] = [Holes::Eighteen, Holes::Nine];

    #[must_use]
    pub fn count(self) -> u8 {
        match self {
            Holes::Nine => 9,
            Holes::Eighteen => 18,
        }
    }

    /// Time on course after which a round of this length is flagged as slow.
    #[must_use]
    pub fn pace_limit(self) -> chrono::Duration {
        match self {
            Holes::Nine => chrono::Duration::hours(2),
            Holes::Eighteen => chrono::Duration::hours(4),
        }
    }
}

impl fmt::Display for Holes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

impl FromStr for Holes {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "9" => Ok(Holes::Nine),
            "18" => Ok(Holes::Eighteen),
            _ => Err(TrackerError::invalid(format!("holes must be 9 or 18, got '{s}'"))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Busyness {
    Light,
    Moderate,
    Heavy,
}

impl Busyness {
    pub const ALL: [Busyness; 3] = [Busyness::Light, Busyness::Moderate, Busyness::Heavy];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Busyness::Light => "Light",
            Busyness::Moderate => "Moderate",
            Busyness::Heavy => "Heavy",
        }
    }
}

impl fmt::Display for Busyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Busyness {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Busyness::Light),
            "moderate" => Ok(Busyness::Moderate),
            "heavy" => Ok(Busyness::Heavy),
            _ => Err(TrackerError::invalid(format!("unknown busyness: '{s}'"))),
        }
    }
}

/// Everything recorded about a round besides who is playing and when.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RoundAttributes {
    pub group_size: GroupSize,
    pub transport: TransportMode,
    pub holes: Option<Holes>,
    pub busyness: Option<Busyness>,
}

impl RoundAttributes {
    #[must_use]
    pub fn new(group_size: GroupSize, transport: TransportMode) -> Self {
        Self {
            group_size,
            transport,
            holes: None,
            busyness: None,
        }
    }

    #[must_use]
    pub fn with_holes(mut self, holes: Holes) -> Self {
        self.holes = Some(holes);
        self
    }

    #[must_use]
    pub fn with_busyness(mut self, busyness: Busyness) -> Self {
        self.busyness = Some(busyness);
        self
    }
}
