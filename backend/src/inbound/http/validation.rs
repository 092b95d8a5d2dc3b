//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path identifiers, calendar dates and clock-in timestamps arrive as text.
//! Each helper parses one of them and, on failure, builds an
//! `invalid_request` error whose `details` name the field, echo the value and
//! carry a stable machine code.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::domain::{Error, RecordId, parse_clock_in_timestamp, parse_date};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidDate,
    InvalidTimestamp,
    InvalidInteger,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidInteger => "invalid_integer",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a 24-character hex ObjectId"))
        .with_value(ErrorCode::InvalidId, value)
}

pub(crate) fn parse_record_id(value: String, field: FieldName) -> Result<RecordId, Error> {
    RecordId::new(&value).map_err(|_| invalid_id_error(field, &value))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a date in YYYY-MM-DD format"))
        .with_value(ErrorCode::InvalidDate, value)
}

pub(crate) fn parse_required_date(value: String, field: FieldName) -> Result<NaiveDate, Error> {
    parse_date(&value).map_err(|_| invalid_date_error(field, &value))
}

/// Parse an optional `YYYY-MM-DD` query value. Blank values mean "absent".
pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    non_blank(value)
        .map(|raw| parse_date(&raw).map_err(|_| invalid_date_error(field, &raw)))
        .transpose()
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(
        field,
        format!("{field} must be a timestamp in YYYY-MM-DD HH:MM:SS format"),
    )
    .with_value(ErrorCode::InvalidTimestamp, value)
}

/// Parse an optional `YYYY-MM-DD HH:MM:SS` query value as UTC.
pub(crate) fn parse_optional_clock_in_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    non_blank(value)
        .map(|raw| {
            parse_clock_in_timestamp(&raw).map_err(|_| invalid_timestamp_error(field, &raw))
        })
        .transpose()
}

/// Parse an optional integer query value. Blank values mean "absent".
pub(crate) fn parse_optional_integer(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<i64>, Error> {
    non_blank(value)
        .map(|raw| {
            raw.trim().parse::<i64>().map_err(|_| {
                let name = field.as_str();
                ValidationError::new(name, format!("{name} must be an integer"))
                    .with_value(ErrorCode::InvalidInteger, raw.as_str())
            })
        })
        .transpose()
}

/// Drop empty or whitespace-only query values.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;

    const ITEM_ID: FieldName = FieldName::new("item_id");
    const EXPIRY_DATE: FieldName = FieldName::new("expiry_date");
    const INSERT_DATETIME: FieldName = FieldName::new("insert_datetime");
    const QUANTITY: FieldName = FieldName::new("quantity");

    #[rstest]
    fn malformed_id_reports_field_and_value() {
        let error = parse_record_id("not-an-id".to_owned(), ITEM_ID).expect_err("invalid id");

        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({"field": "item_id", "value": "not-an-id", "code": "invalid_id"}))
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("  "), None)]
    #[case(Some("2025-03-10"), NaiveDate::from_ymd_opt(2025, 3, 10))]
    fn dates_parse_or_are_absent(#[case] raw: Option<&str>, #[case] expected: Option<NaiveDate>) {
        let parsed = parse_optional_date(raw.map(str::to_owned), EXPIRY_DATE).expect("valid");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("10/03/2025")]
    #[case("2025-13-01")]
    #[case("2025-03-10T00:00:00Z")]
    fn malformed_dates_are_rejected(#[case] raw: &str) {
        let error = parse_optional_date(Some(raw.to_owned()), EXPIRY_DATE).expect_err("invalid");
        assert_eq!(
            error.details().and_then(|details| details.get("code")),
            Some(&json!("invalid_date"))
        );
    }

    #[rstest]
    #[case(Some("5"), Some(5))]
    #[case(Some(" 12 "), Some(12))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn integers_parse_or_are_absent(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        let parsed = parse_optional_integer(raw.map(str::to_owned), QUANTITY).expect("valid");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn non_numeric_quantity_is_rejected() {
        let error =
            parse_optional_integer(Some("lots".to_owned()), QUANTITY).expect_err("invalid");
        assert_eq!(
            error.details(),
            Some(&json!({"field": "quantity", "value": "lots", "code": "invalid_integer"}))
        );
    }

    #[rstest]
    fn clock_in_timestamps_use_space_separated_format() {
        let parsed = parse_optional_clock_in_timestamp(
            Some("2025-01-02 03:04:05".to_owned()),
            INSERT_DATETIME,
        )
        .expect("valid");
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).single()
        );

        let error = parse_optional_clock_in_timestamp(
            Some("2025-01-02T03:04:05".to_owned()),
            INSERT_DATETIME,
        )
        .expect_err("ISO form is rejected");
        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
    }
}
