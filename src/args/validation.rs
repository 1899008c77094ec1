use chrono::NaiveDate;

use crate::model::{DATE_FORMAT, GroupSize, ManualTime};

pub const MAX_REFRESH_SECS: u64 = 3600;

/// # Errors
///
/// Will return `Err` if the value is not a number from 1 to 6
pub fn parse_group_size(value: &str) -> Result<GroupSize, String> {
    value.parse().map_err(|e| format!("{e}"))
}

/// # Errors
///
/// Will return `Err` if the value is not a time like `9:30 AM`
pub fn parse_manual_time(value: &str) -> Result<ManualTime, String> {
    value.parse().map_err(|e| format!("{e}"))
}

/// # Errors
///
/// Will return `Err` if the value is not a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| format!("'{value}' is not a YYYY-MM-DD date: {e}"))
}

/// # Errors
///
/// Will return `Err` if the value is not between 1 and 3600 seconds
pub fn parse_refresh_secs(value: &str) -> Result<u64, String> {
    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("refresh interval '{value}' is not a number"))?;
    check_refresh_secs(secs)
}

/// # Errors
///
/// Will return `Err` if `secs` is 0 or above an hour
pub fn check_refresh_secs(secs: u64) -> Result<u64, String> {
    if secs == 0 || secs > MAX_REFRESH_SECS {
        return Err(format!(
            "refresh interval must be between 1 and {MAX_REFRESH_SECS} seconds, got {secs}"
        ));
    }
    Ok(secs)
}
