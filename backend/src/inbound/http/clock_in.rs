//! Clock-in HTTP handlers.
//!
//! ```text
//! POST /clock-in
//! GET /clock-in?email=&location=&insert_datetime=
//! GET /clock-in/{clock_in_id}
//! PUT /clock-in/{clock_in_id}
//! DELETE /clock-in/{clock_in_id}
//! ```

use actix_web::{Scope, delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ClockIn, ClockInFilter, ClockInPatch, NewClockIn, format_timestamp};
use crate::inbound::http::ApiResult;
use crate::inbound::http::items::DeleteResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, parse_optional_clock_in_timestamp, parse_record_id,
};

const CLOCK_IN_ID: FieldName = FieldName::new("clock_in_id");
const INSERT_DATETIME: FieldName = FieldName::new("insert_datetime");

/// Request payload for recording a check-in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ClockInCreateBody {
    pub email: String,
    pub location: String,
}

/// Partial update payload. Absent fields are left as they are.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ClockInUpdateBody {
    pub email: Option<String>,
    pub location: Option<String>,
}

/// Query parameters for the clock-in listing.
///
/// The `*_filter` spellings used by older clients are accepted as aliases.
/// Supplying one filter under both names (`?email=a&email_filter=b`) is a
/// duplicate field and the request is rejected with `invalid_request`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ClockInFilterQuery {
    #[serde(alias = "email_filter")]
    pub email: Option<String>,
    #[serde(alias = "location_filter")]
    pub location: Option<String>,
    #[serde(alias = "insert_datetime_filter")]
    pub insert_datetime: Option<String>,
}

/// Path parameters for single-record routes.
#[derive(Debug, Deserialize)]
pub struct ClockInPath {
    pub clock_in_id: String,
}

/// Stored check-in as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ClockInResponse {
    #[schema(example = "65f1c0ffee0000000000abcd")]
    pub id: String,
    pub email: String,
    pub location: String,
    #[schema(format = "date-time", example = "2025-01-02T03:04:05Z")]
    pub insert_datetime: String,
}

impl From<ClockIn> for ClockInResponse {
    fn from(value: ClockIn) -> Self {
        Self {
            id: value.id.to_string(),
            email: value.email,
            location: value.location,
            insert_datetime: format_timestamp(value.insert_datetime),
        }
    }
}

fn parse_clock_in_filter(query: ClockInFilterQuery) -> ApiResult<ClockInFilter> {
    Ok(ClockInFilter {
        email: non_blank(query.email),
        location: non_blank(query.location),
        insert_datetime: parse_optional_clock_in_timestamp(query.insert_datetime, INSERT_DATETIME)?,
    })
}

/// Routes under `/clock-in`.
pub fn clock_in_scope() -> Scope {
    web::scope("/clock-in")
        .service(
            web::resource(["", "/"])
                .route(web::get().to(list_clock_ins))
                .route(web::post().to(create_clock_in)),
        )
        .service(get_clock_in)
        .service(update_clock_in)
        .service(delete_clock_in)
}

/// Record a check-in stamped with the current server time.
#[utoipa::path(
    post,
    path = "/clock-in",
    request_body = ClockInCreateBody,
    responses(
        (status = 200, description = "Check-in recorded", body = ClockInResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clock-in"],
    operation_id = "createClockIn"
)]
pub async fn create_clock_in(
    state: web::Data<HttpState>,
    payload: web::Json<ClockInCreateBody>,
) -> ApiResult<web::Json<ClockInResponse>> {
    let ClockInCreateBody { email, location } = payload.into_inner();
    let created = state
        .clock_ins
        .create_clock_in(NewClockIn { email, location })
        .await?;
    Ok(web::Json(ClockInResponse::from(created)))
}

/// List check-ins matching every supplied filter.
///
/// `insert_datetime` uses the `YYYY-MM-DD HH:MM:SS` form, read as UTC, and
/// selects records made at or after that instant.
#[utoipa::path(
    get,
    path = "/clock-in",
    params(
        ("email" = Option<String>, Query, description = "Exact email"),
        ("location" = Option<String>, Query, description = "Exact location"),
        ("insert_datetime" = Option<String>, Query, description = "Earliest check-in time, YYYY-MM-DD HH:MM:SS UTC")
    ),
    responses(
        (status = 200, description = "Matching check-ins", body = [ClockInResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clock-in"],
    operation_id = "listClockIns"
)]
pub async fn list_clock_ins(
    state: web::Data<HttpState>,
    query: web::Query<ClockInFilterQuery>,
) -> ApiResult<web::Json<Vec<ClockInResponse>>> {
    let filter = parse_clock_in_filter(query.into_inner())?;
    let records = state.clock_ins_query.filter_clock_ins(filter).await?;
    Ok(web::Json(
        records.into_iter().map(ClockInResponse::from).collect(),
    ))
}

/// Fetch one check-in.
#[utoipa::path(
    get,
    path = "/clock-in/{clock_in_id}",
    params(("clock_in_id" = String, Path, description = "24-character hex record identifier")),
    responses(
        (status = 200, description = "Check-in", body = ClockInResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clock-in"],
    operation_id = "getClockIn"
)]
#[get("/{clock_in_id}")]
pub async fn get_clock_in(
    state: web::Data<HttpState>,
    path: web::Path<ClockInPath>,
) -> ApiResult<web::Json<ClockInResponse>> {
    let id = parse_record_id(path.into_inner().clock_in_id, CLOCK_IN_ID)?;
    let record = state.clock_ins_query.get_clock_in(id).await?;
    Ok(web::Json(ClockInResponse::from(record)))
}

/// Apply a partial update and return the current record. `insert_datetime`
/// never changes.
#[utoipa::path(
    put,
    path = "/clock-in/{clock_in_id}",
    params(("clock_in_id" = String, Path, description = "24-character hex record identifier")),
    request_body = ClockInUpdateBody,
    responses(
        (status = 200, description = "Updated check-in", body = ClockInResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clock-in"],
    operation_id = "updateClockIn"
)]
#[put("/{clock_in_id}")]
pub async fn update_clock_in(
    state: web::Data<HttpState>,
    path: web::Path<ClockInPath>,
    payload: web::Json<ClockInUpdateBody>,
) -> ApiResult<web::Json<ClockInResponse>> {
    let id = parse_record_id(path.into_inner().clock_in_id, CLOCK_IN_ID)?;
    let ClockInUpdateBody { email, location } = payload.into_inner();
    let record = state
        .clock_ins
        .update_clock_in(id, ClockInPatch { email, location })
        .await?;
    Ok(web::Json(ClockInResponse::from(record)))
}

/// Delete one check-in.
#[utoipa::path(
    delete,
    path = "/clock-in/{clock_in_id}",
    params(("clock_in_id" = String, Path, description = "24-character hex record identifier")),
    responses(
        (status = 200, description = "Check-in deleted", body = DeleteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clock-in"],
    operation_id = "deleteClockIn"
)]
#[delete("/{clock_in_id}")]
pub async fn delete_clock_in(
    state: web::Data<HttpState>,
    path: web::Path<ClockInPath>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = parse_record_id(path.into_inner().clock_in_id, CLOCK_IN_ID)?;
    state.clock_ins.delete_clock_in(id).await?;
    Ok(web::Json(DeleteResponse::new(
        "Clock-in record deleted successfully",
    )))
}

#[cfg(test)]
#[path = "clock_in_tests.rs"]
mod tests;
