use serde::Deserialize;

use crate::error::TrackerError;
use crate::model::{
    Busyness, GroupSize, Holes, ManualTime, Meridiem, RoundAttributes, TimeSource, TransportMode,
};

fn filled(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Blank hour and minute mean "now"; anything else must be a valid manual time.
fn time_source(
    hour: Option<&String>,
    minute: Option<&String>,
    ampm: Option<&String>,
) -> Result<TimeSource, TrackerError> {
    match (filled(hour), filled(minute)) {
        (None, None) => Ok(TimeSource::Now),
        (hour, minute) => {
            let meridiem = match filled(ampm) {
                Some(m) => m.parse::<Meridiem>()?,
                None => Meridiem::default(),
            };
            let manual = ManualTime::parse(hour.unwrap_or_default(), minute.unwrap_or_default(), meridiem)?;
            Ok(TimeSource::Manual(manual))
        }
    }
}

/// Fields posted by the start-round form. Everything arrives as text so bad
/// values come back as a status message instead of an extractor rejection.
#[derive(Deserialize, Debug, Default)]
pub struct StartForm {
    #[serde(default)]
    pub name: String,
    pub group_size: Option<String>,
    pub transport: Option<String>,
    pub holes: Option<String>,
    pub busyness: Option<String>,
    pub start_hour: Option<String>,
    pub start_minute: Option<String>,
    pub start_ampm: Option<String>,
}

impl StartForm {
    /// # Errors
    ///
    /// Will return `Err` if any attribute field holds a value outside its choices
    pub fn attributes(&self) -> Result<RoundAttributes, TrackerError> {
        let group_size = match filled(self.group_size.as_ref()) {
            Some(s) => s.parse::<GroupSize>()?,
            None => GroupSize::default(),
        };
        let transport = match filled(self.transport.as_ref()) {
            Some(s) => s.parse::<TransportMode>()?,
            None => TransportMode::default(),
        };
        let holes = filled(self.holes.as_ref()).map(str::parse::<Holes>).transpose()?;
        let busyness = filled(self.busyness.as_ref())
            .map(str::parse::<Busyness>)
            .transpose()?;
        Ok(RoundAttributes {
            group_size,
            transport,
            holes,
            busyness,
        })
    }

    /// # Errors
    ///
    /// Will return `Err` if a manual start time was entered but does not parse
    pub fn start_time(&self) -> Result<TimeSource, TrackerError> {
        time_source(
            self.start_hour.as_ref(),
            self.start_minute.as_ref(),
            self.start_ampm.as_ref(),
        )
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct EndForm {
    #[serde(default)]
    pub name: String,
    pub end_hour: Option<String>,
    pub end_minute: Option<String>,
    pub end_ampm: Option<String>,
}

impl EndForm {
    /// # Errors
    ///
    /// Will return `Err` if a manual end time was entered but does not parse
    pub fn end_time(&self) -> Result<TimeSource, TrackerError> {
        time_source(
            self.end_hour.as_ref(),
            self.end_minute.as_ref(),
            self.end_ampm.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_time_fields_mean_now() {
        let form = EndForm {
            name: "Alice".to_string(),
            end_hour: Some(" ".to_string()),
            end_minute: None,
            end_ampm: Some("PM".to_string()),
        };
        assert_eq!(form.end_time().ok(), Some(TimeSource::Now));
    }

    #[test]
    fn half_filled_time_is_rejected() {
        let form = StartForm {
            name: "Bob".to_string(),
            start_hour: Some("9".to_string()),
            ..StartForm::default()
        };
        assert!(matches!(form.start_time(), Err(TrackerError::InvalidInput(_))));
    }

    #[test]
    fn attributes_default_to_one_player_in_a_cart() {
        let form = StartForm {
            name: "Cara".to_string(),
            ..StartForm::default()
        };
        let attrs = form.attributes().expect("defaults are valid");
        assert_eq!(attrs.group_size.get(), 1);
        assert_eq!(attrs.transport, TransportMode::Cart);
        assert_eq!(attrs.holes, None);
    }

    #[test]
    fn out_of_range_group_size_is_rejected() {
        let form = StartForm {
            name: "Dee".to_string(),
            group_size: Some("9".to_string()),
            ..StartForm::default()
        };
        assert!(form.attributes().is_err());
    }
}
