//! Date Range Resolution
//!
//! Turns a start date plus either an explicit stop date or a month/day
//! offset into the `YYYY-MM-DD` pair sent as `start-date` / `end-date`.
//!
//! Accepted date forms:
//!
//! ```text
//! 2023-01-31      absolute date
//! today           the current UTC date
//! yesterday       one day before today
//! 7daysAgo        N days before today
//! ```

use crate::query::{QueryError, QueryResult};
use chrono::{Days, Duration, Months, NaiveDate, Utc};

/// Date format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve a date range relative to the current UTC date
pub fn daterange(
    start: &str,
    stop: Option<&str>,
    months: i32,
    days: i64,
) -> QueryResult<(String, String)> {
    daterange_from(Utc::now().date_naive(), start, stop, months, days)
}

/// Resolve a date range relative to `today`
///
/// With an explicit `stop` the offsets are ignored. Without one, the stop
/// date is `start` shifted by `months` and then `days`; a negative shift
/// yields a range that ends on `start`.
pub fn daterange_from(
    today: NaiveDate,
    start: &str,
    stop: Option<&str>,
    months: i32,
    days: i64,
) -> QueryResult<(String, String)> {
    let start = parse_date(start, today)?;

    let (first, last) = match stop {
        Some(stop) => {
            let stop = parse_date(stop, today)?;
            if stop < start {
                return Err(QueryError::InvalidDate(format!(
                    "end date {} precedes start date {}",
                    stop.format(DATE_FORMAT),
                    start.format(DATE_FORMAT)
                )));
            }
            (start, stop)
        }
        None => {
            let shifted = shift(start, months, days)?;
            if shifted < start {
                (shifted, start)
            } else {
                (start, shifted)
            }
        }
    };

    Ok((
        first.format(DATE_FORMAT).to_string(),
        last.format(DATE_FORMAT).to_string(),
    ))
}

/// Parse an absolute or relative date
pub fn parse_date(value: &str, today: NaiveDate) -> QueryResult<NaiveDate> {
    let value = value.trim();

    match value {
        "today" => return Ok(today),
        "yesterday" => {
            return today
                .checked_sub_days(Days::new(1))
                .ok_or_else(|| QueryError::InvalidDate(value.to_string()))
        }
        _ => {}
    }

    let re = regex::Regex::new(r"^(\d+)daysAgo$")
        .map_err(|_| QueryError::InvalidDate("Regex error".to_string()))?;
    if let Some(caps) = re.captures(value) {
        let n: i64 = caps[1]
            .parse()
            .map_err(|_| QueryError::InvalidDate(value.to_string()))?;
        return Duration::try_days(n)
            .and_then(|offset| today.checked_sub_signed(offset))
            .ok_or_else(|| QueryError::InvalidDate(value.to_string()));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| QueryError::InvalidDate(value.to_string()))
}

fn shift(date: NaiveDate, months: i32, days: i64) -> QueryResult<NaiveDate> {
    let overflow = || QueryError::InvalidDate(format!("offset out of range from {}", date));

    let date = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
    .ok_or_else(overflow)?;

    Duration::try_days(days)
        .and_then(|offset| date.checked_add_signed(offset))
        .ok_or_else(overflow)
}
