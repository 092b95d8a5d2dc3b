//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a UUID")
}

#[rstest]
fn constructors_set_matching_codes() {
    let cases = [
        (Error::invalid_request("bad"), ErrorCode::InvalidRequest),
        (Error::not_found("missing"), ErrorCode::NotFound),
        (Error::service_unavailable("down"), ErrorCode::ServiceUnavailable),
        (Error::internal("boom"), ErrorCode::InternalError),
    ];
    for (err, code) in cases {
        assert_eq!(err.code(), code);
    }
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::NotFound, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_falls_back_to_generic_message_when_blank() {
    let err = Error::new(ErrorCode::InternalError, "");
    assert_eq!(err.message(), "Internal server error");
}

#[rstest]
fn trace_id_is_absent_outside_request_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(trace_id: TraceId) {
    let err = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
    assert_eq!(err.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_message_under_detail_key() {
    let err = Error::not_found("Item not found")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "item_id" }));

    let value = serde_json::to_value(&err).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "not_found",
            "detail": "Item not found",
            "traceId": TRACE_ID,
            "details": { "field": "item_id" },
        })
    );
}

#[rstest]
fn omits_optional_fields_when_absent() {
    let value = serde_json::to_value(Error::invalid_request("bad")).expect("error serialises");
    assert_eq!(value, json!({ "code": "invalid_request", "detail": "bad" }));
}
