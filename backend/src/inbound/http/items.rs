//! Item HTTP handlers.
//!
//! ```text
//! POST /items
//! GET /items?email=&expiry_date=&insert_date=&quantity=
//! GET /items/aggregate
//! GET /items/{item_id}
//! PUT /items/{item_id}
//! DELETE /items/{item_id}
//! ```
//!
//! The collection routes answer with and without a trailing slash.

use actix_web::{Scope, delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AggregatedItem, AggregatedItemDetail, Item, ItemFilter, ItemPatch, NewItem, format_timestamp,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, parse_optional_date, parse_optional_integer, parse_record_id,
    parse_required_date,
};

const ITEM_ID: FieldName = FieldName::new("item_id");
const EXPIRY_DATE: FieldName = FieldName::new("expiry_date");
const INSERT_DATE: FieldName = FieldName::new("insert_date");
const QUANTITY: FieldName = FieldName::new("quantity");

/// Request payload for creating an item.
///
/// Server-assigned fields such as `insert_date` are ignored if supplied.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ItemCreateBody {
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    #[schema(format = "date", example = "2025-03-10")]
    pub expiry_date: String,
}

/// Request payload for a partial item update. Absent fields are left as they
/// are.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ItemUpdateBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub item_name: Option<String>,
    pub quantity: Option<i64>,
    #[schema(format = "date", example = "2025-03-10")]
    pub expiry_date: Option<String>,
}

/// Query parameters accepted by the item listing. Blank values are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ItemFilterQuery {
    pub email: Option<String>,
    pub expiry_date: Option<String>,
    pub insert_date: Option<String>,
    pub quantity: Option<String>,
}

/// Path parameters for single-item routes.
#[derive(Debug, Deserialize)]
pub struct ItemPath {
    pub item_id: String,
}

/// Stored item as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ItemResponse {
    #[schema(example = "65f1c0ffee0000000000abcd")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    #[schema(format = "date-time", example = "2025-03-10T00:00:00Z")]
    pub expiry_date: String,
    #[schema(format = "date-time")]
    pub insert_date: String,
}

impl From<Item> for ItemResponse {
    fn from(value: Item) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email,
            item_name: value.item_name,
            quantity: value.quantity,
            expiry_date: format_timestamp(value.expiry_date),
            insert_date: format_timestamp(value.insert_date),
        }
    }
}

/// One contributing item inside an aggregation group.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AggregatedItemDetailResponse {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    #[schema(format = "date-time")]
    pub expiry_date: Option<String>,
    #[schema(format = "date-time")]
    pub insert_date: Option<String>,
}

impl From<AggregatedItemDetail> for AggregatedItemDetailResponse {
    fn from(value: AggregatedItemDetail) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            quantity: value.quantity,
            expiry_date: value.expiry_date.map(format_timestamp),
            insert_date: value.insert_date.map(format_timestamp),
        }
    }
}

/// Inventory statistics for one owner email.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AggregatedItemResponse {
    pub email: String,
    pub total_items: i64,
    pub total_quantity: i64,
    pub avg_quantity: f64,
    #[schema(format = "date-time")]
    pub min_expiry_date: Option<String>,
    #[schema(format = "date-time")]
    pub max_expiry_date: Option<String>,
    pub expiring_soon: i64,
    pub expired: i64,
    pub items: Vec<AggregatedItemDetailResponse>,
}

impl From<AggregatedItem> for AggregatedItemResponse {
    fn from(value: AggregatedItem) -> Self {
        Self {
            email: value.email,
            total_items: value.total_items,
            total_quantity: value.total_quantity,
            avg_quantity: value.avg_quantity,
            min_expiry_date: value.min_expiry_date.map(format_timestamp),
            max_expiry_date: value.max_expiry_date.map(format_timestamp),
            expiring_soon: value.expiring_soon,
            expired: value.expired,
            items: value
                .items
                .into_iter()
                .map(AggregatedItemDetailResponse::from)
                .collect(),
        }
    }
}

/// Confirmation body returned by delete routes.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Item deleted successfully")]
    pub message: String,
}

impl DeleteResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

fn parse_new_item(body: ItemCreateBody) -> ApiResult<NewItem> {
    Ok(NewItem {
        expiry_date: parse_required_date(body.expiry_date, EXPIRY_DATE)?,
        name: body.name,
        email: body.email,
        item_name: body.item_name,
        quantity: body.quantity,
    })
}

fn parse_item_patch(body: ItemUpdateBody) -> ApiResult<ItemPatch> {
    Ok(ItemPatch {
        expiry_date: body
            .expiry_date
            .map(|raw| parse_required_date(raw, EXPIRY_DATE))
            .transpose()?,
        name: body.name,
        email: body.email,
        item_name: body.item_name,
        quantity: body.quantity,
    })
}

fn parse_item_filter(query: ItemFilterQuery) -> ApiResult<ItemFilter> {
    Ok(ItemFilter {
        email: non_blank(query.email),
        expiry_date: parse_optional_date(query.expiry_date, EXPIRY_DATE)?,
        insert_date: parse_optional_date(query.insert_date, INSERT_DATE)?,
        quantity: parse_optional_integer(query.quantity, QUANTITY)?,
    })
}

/// Routes under `/items`.
///
/// `/items/aggregate` is registered ahead of `/items/{item_id}` so the
/// literal segment is never read as an identifier.
pub fn items_scope() -> Scope {
    web::scope("/items")
        .service(
            web::resource(["", "/"])
                .route(web::get().to(list_items))
                .route(web::post().to(create_item)),
        )
        .service(aggregate_items)
        .service(get_item)
        .service(update_item)
        .service(delete_item)
}

/// Create an item. The server stamps `insert_date` and stores `expiry_date`
/// as midnight UTC.
#[utoipa::path(
    post,
    path = "/items",
    request_body = ItemCreateBody,
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
pub async fn create_item(
    state: web::Data<HttpState>,
    payload: web::Json<ItemCreateBody>,
) -> ApiResult<web::Json<ItemResponse>> {
    let item = parse_new_item(payload.into_inner())?;
    let created = state.items.create_item(item).await?;
    Ok(web::Json(ItemResponse::from(created)))
}

/// List items matching every supplied filter.
///
/// `expiry_date` and `insert_date` select records on or after midnight UTC of
/// the given day; `quantity` selects records holding at least that many.
#[utoipa::path(
    get,
    path = "/items",
    params(
        ("email" = Option<String>, Query, description = "Exact owner email"),
        ("expiry_date" = Option<String>, Query, description = "Earliest expiry date, YYYY-MM-DD"),
        ("insert_date" = Option<String>, Query, description = "Earliest insertion date, YYYY-MM-DD"),
        ("quantity" = Option<i64>, Query, description = "Minimum quantity")
    ),
    responses(
        (status = 200, description = "Matching items", body = [ItemResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
pub async fn list_items(
    state: web::Data<HttpState>,
    query: web::Query<ItemFilterQuery>,
) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let filter = parse_item_filter(query.into_inner())?;
    let items = state.items_query.filter_items(filter).await?;
    Ok(web::Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Per-owner inventory statistics, largest total quantity first.
#[utoipa::path(
    get,
    path = "/items/aggregate",
    responses(
        (status = 200, description = "Statistics per owner email", body = [AggregatedItemResponse]),
        (status = 500, description = "Aggregation failed", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "aggregateItems"
)]
#[get("/aggregate")]
pub async fn aggregate_items(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AggregatedItemResponse>>> {
    let groups = state.items_query.aggregate_items().await?;
    Ok(web::Json(
        groups.into_iter().map(AggregatedItemResponse::from).collect(),
    ))
}

/// Fetch one item.
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    params(("item_id" = String, Path, description = "24-character hex item identifier")),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/{item_id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    path: web::Path<ItemPath>,
) -> ApiResult<web::Json<ItemResponse>> {
    let id = parse_record_id(path.into_inner().item_id, ITEM_ID)?;
    let item = state.items_query.get_item(id).await?;
    Ok(web::Json(ItemResponse::from(item)))
}

/// Apply a partial update and return the current record.
#[utoipa::path(
    put,
    path = "/items/{item_id}",
    params(("item_id" = String, Path, description = "24-character hex item identifier")),
    request_body = ItemUpdateBody,
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[put("/{item_id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    path: web::Path<ItemPath>,
    payload: web::Json<ItemUpdateBody>,
) -> ApiResult<web::Json<ItemResponse>> {
    let id = parse_record_id(path.into_inner().item_id, ITEM_ID)?;
    let patch = parse_item_patch(payload.into_inner())?;
    let item = state.items.update_item(id, patch).await?;
    Ok(web::Json(ItemResponse::from(item)))
}

/// Delete one item.
#[utoipa::path(
    delete,
    path = "/items/{item_id}",
    params(("item_id" = String, Path, description = "24-character hex item identifier")),
    responses(
        (status = 200, description = "Item deleted", body = DeleteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/{item_id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    path: web::Path<ItemPath>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = parse_record_id(path.into_inner().item_id, ITEM_ID)?;
    state.items.delete_item(id).await?;
    Ok(web::Json(DeleteResponse::new("Item deleted successfully")))
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
