use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// A time that lands this far before the previous one is taken to be past midnight
const MIDNIGHT_ROLLOVER_THRESHOLD_HOURS: i64 = 12;

/// Parse a 24-hour `HHMM` time as used by the schedule API
///
/// Anything other than exactly four ASCII digits forming a valid time yields
/// `None`. This includes the half-minute suffix (`"1234H"`) that some realtime
/// feeds append.
#[must_use]
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H%M").ok()
}

/// Parse an `HHMM` value onto the given service date
#[must_use]
pub fn parse_hhmm_on(s: &str, service_date: NaiveDate) -> Option<NaiveDateTime> {
    parse_hhmm(s).map(|time| service_date.and_time(time))
}

/// Move `time` to the following day when it falls far enough before `previous`
/// that the service must have run past midnight
#[must_use]
pub fn roll_past_midnight(time: NaiveDateTime, previous: Option<NaiveDateTime>) -> NaiveDateTime {
    match previous {
        Some(prev) if prev - time > Duration::hours(MIDNIGHT_ROLLOVER_THRESHOLD_HOURS) => {
            time + Duration::days(1)
        }
        _ => time,
    }
}

/// Milliseconds since the Unix epoch, treating the naive time as UTC
///
/// Only differences between values matter for the chart scales.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_millis(time: NaiveDateTime) -> f64 {
    time.and_utc().timestamp_millis() as f64
}

/// Inverse of [`to_millis`]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn from_millis(millis: f64) -> Option<NaiveDateTime> {
    chrono::DateTime::from_timestamp_millis(millis.round() as i64).map(|dt| dt.naive_utc())
}

/// Axis label for a time tick
#[must_use]
pub fn format_hhmm(time: NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}
