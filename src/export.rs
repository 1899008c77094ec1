use serde::Serialize;

use crate::error::TrackerError;
use crate::model::{DATE_FORMAT, Round, format_timestamp};

#[derive(Serialize)]
struct HistoryCsvRow<'a> {
    date: String,
    name: &'a str,
    group_size: u8,
    transport: &'static str,
    holes: Option<u8>,
    busyness: Option<&'static str>,
    start_time: String,
    end_time: String,
    elapsed: String,
}

impl<'a> From<&'a Round> for HistoryCsvRow<'a> {
    fn from(round: &'a Round) -> Self {
        let attrs = &round.attributes;
        Self {
            date: round.history_date().format(DATE_FORMAT).to_string(),
            name: &round.golfer_name,
            group_size: attrs.group_size.get(),
            transport: attrs.transport.as_str(),
            holes: attrs.holes.map(|h| h.count()),
            busyness: attrs.busyness.map(|b| b.as_str()),
            start_time: format_timestamp(&round.start_time),
            end_time: round.end_time.as_ref().map(format_timestamp).unwrap_or_default(),
            elapsed: round.elapsed.map(|e| e.to_string()).unwrap_or_default(),
        }
    }
}

/// Render finished rounds as CSV with a header row.
///
/// # Errors
///
/// Will return `Err` if the csv writer fails
pub fn history_csv(rounds: &[Round]) -> Result<String, TrackerError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    if rounds.is_empty() {
        writer.write_record([
            "date", "name", "group_size", "transport", "holes", "busyness", "start_time",
            "end_time", "elapsed",
        ])?;
    }
    for round in rounds {
        writer.serialize(HistoryCsvRow::from(round))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TrackerError::Export(e.to_string()))
}
