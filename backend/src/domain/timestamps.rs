//! Date and timestamp conventions shared by both resources.
//!
//! Calendar dates are persisted as the timestamp of midnight UTC on that day
//! so that range comparisons in the store behave like date comparisons.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

/// Accepted format for date-only filters and payload fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted format for the clock-in `insert_datetime` filter.
pub const CLOCK_IN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Midnight UTC at the start of `date`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pantry::domain::{format_timestamp, start_of_day};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");
/// assert_eq!(format_timestamp(start_of_day(date)), "2025-03-10T00:00:00Z");
/// ```
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}

/// Failure to read a clock-in timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("timestamp must be exactly YYYY-MM-DD HH:MM:SS")]
    Shape,
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Byte layout of [`CLOCK_IN_TIMESTAMP_FORMAT`]: `d` is an ASCII digit, every
/// other byte must match literally.
const CLOCK_IN_TIMESTAMP_SHAPE: &[u8; 19] = b"dddd-dd-dd dd:dd:dd";

fn has_clock_in_shape(raw: &str) -> bool {
    raw.len() == CLOCK_IN_TIMESTAMP_SHAPE.len()
        && raw
            .bytes()
            .zip(CLOCK_IN_TIMESTAMP_SHAPE.iter())
            .all(|(byte, &expected)| match expected {
                b'd' => byte.is_ascii_digit(),
                literal => byte == literal,
            })
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp, interpreted as UTC.
///
/// The layout is matched byte for byte before chrono validates the calendar,
/// so surrounding whitespace, missing padding or a missing separator are
/// rejected.
pub fn parse_clock_in_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    if !has_clock_in_shape(raw) {
        return Err(TimestampError::Shape);
    }
    let naive = NaiveDateTime::parse_from_str(raw, CLOCK_IN_TIMESTAMP_FORMAT)?;
    Ok(naive.and_utc())
}

/// Render a timestamp as RFC 3339 with a `Z` suffix; sub-second digits only
/// appear when non-zero.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn start_of_day_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date");
        let midnight = start_of_day(date);
        assert_eq!(midnight.date_naive(), date);
        assert_eq!(midnight.num_seconds_from_midnight(), 0);
    }

    #[rstest]
    #[case("2025-03-10", Some((2025, 3, 10)))]
    #[case(" 2024-02-29 ", Some((2024, 2, 29)))]
    #[case("2023-02-29", None)]
    #[case("10/03/2025", None)]
    #[case("2025-03-10T00:00:00Z", None)]
    fn parse_date_accepts_only_calendar_dates(
        #[case] raw: &str,
        #[case] expected: Option<(i32, u32, u32)>,
    ) {
        let parsed = parse_date(raw).ok();
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn clock_in_timestamp_parses_as_utc() {
        let parsed = parse_clock_in_timestamp("2025-01-02 03:04:05").expect("valid timestamp");
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).single().expect("valid")
        );
    }

    #[rstest]
    #[case("2025-01-02T03:04:05")]
    #[case("2025-01-02")]
    #[case("2025-01-0203:04:05")]
    #[case(" 2025-01-02 03:04:05")]
    #[case("2025-01-02 03:04:05 ")]
    #[case("2025-01-02   03:04:05")]
    #[case("2025-1-02 03:04:05")]
    #[case("+2025-01-02 03:04:05")]
    fn clock_in_timestamp_requires_exact_format(#[case] raw: &str) {
        assert_eq!(parse_clock_in_timestamp(raw), Err(TimestampError::Shape));
    }

    #[rstest]
    fn clock_in_timestamp_with_impossible_calendar_is_a_parse_error() {
        assert!(matches!(
            parse_clock_in_timestamp("2025-02-30 03:04:05"),
            Err(TimestampError::Parse(_))
        ));
    }

    #[rstest]
    fn format_timestamp_uses_zulu_suffix() {
        let whole = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).single().expect("valid");
        assert_eq!(format_timestamp(whole), "2025-03-10T00:00:00Z");

        let fractional = whole + chrono::TimeDelta::milliseconds(250);
        assert_eq!(format_timestamp(fractional), "2025-03-10T00:00:00.250Z");
    }
}
