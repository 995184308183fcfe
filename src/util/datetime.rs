use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::ScrapeError;

const ISO_DATE_LEN: usize = 10;

/// Parses the date part of an ISO 8601 quote time.
///
/// Only the first ten characters (`YYYY-MM-DD`) are looked at, so
/// `2023-04-05T10:15:00` and `2023-04-05T10:15:00-04:00` both give 2023-04-05.
pub fn parse_quote_date(quote_time: &str) -> Result<NaiveDate, ScrapeError> {
    let date = quote_time
        .get(..ISO_DATE_LEN)
        .ok_or_else(|| ScrapeError::MalformedDate(quote_time.to_string()))?;

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ScrapeError::MalformedDate(date.to_string()))
}

/// Midnight UTC of `date`, seen from `tz`.
pub fn midnight_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .with_timezone(tz)
}

/// Formats a quote date for display in `tz`, e.g. `2023-04-05 00:00:00 +0000`.
pub fn display_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    midnight_in(date, tz)
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string()
}
