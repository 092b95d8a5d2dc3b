//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every item, clock-in and health endpoint from the inbound
//!   layer
//! - **Schemas**: request and response bodies plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe the error envelope
//!   without coupling domain types to utoipa
//!
//! The generated document is served by Swagger UI and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::clock_in::{ClockInCreateBody, ClockInResponse, ClockInUpdateBody};
use crate::inbound::http::items::{
    AggregatedItemDetailResponse, AggregatedItemResponse, DeleteResponse, ItemCreateBody,
    ItemResponse, ItemUpdateBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pantry backend API",
        description = "CRUD endpoints for inventory items and clock-in records, plus per-owner inventory statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::aggregate_items,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::clock_in::create_clock_in,
        crate::inbound::http::clock_in::list_clock_ins,
        crate::inbound::http::clock_in::get_clock_in,
        crate::inbound::http::clock_in::update_clock_in,
        crate::inbound::http::clock_in::delete_clock_in,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ItemCreateBody,
        ItemUpdateBody,
        ItemResponse,
        AggregatedItemResponse,
        AggregatedItemDetailResponse,
        ClockInCreateBody,
        ClockInUpdateBody,
        ClockInResponse,
        DeleteResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "items", description = "Inventory items with expiry tracking"),
        (name = "clock-in", description = "Timestamped check-ins"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_uses_detail_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "detail");
    }

    #[rstest]
    #[case("/items")]
    #[case("/items/aggregate")]
    #[case("/items/{item_id}")]
    #[case("/clock-in")]
    #[case("/clock-in/{clock_in_id}")]
    #[case("/health/ready")]
    fn openapi_lists_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
