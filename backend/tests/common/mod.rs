//! Shared harness for HTTP integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`. This
//! module assembles the full Actix application over the in-memory
//! repositories with a pinned clock, so tests exercise every layer except
//! MongoDB itself.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::{Clock, MockClock};
use serde_json::Value;

use pantry::Trace;
use pantry::domain::{ClockInService, ItemService};
use pantry::inbound::http::clock_in::clock_in_scope;
use pantry::inbound::http::error::{json_config, query_config};
use pantry::inbound::http::items::items_scope;
use pantry::inbound::http::state::HttpState;
use pantry::test_support::memory::{InMemoryClockInRepository, InMemoryItemRepository};

/// Instant every service in the harness treats as "now".
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn pinned_clock(at: DateTime<Utc>) -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(at);
    Arc::new(clock)
}

/// In-memory stores plus the handler state built over them.
pub struct Harness {
    pub items: InMemoryItemRepository,
    pub state: HttpState,
}

impl Harness {
    pub fn new() -> Self {
        let items = InMemoryItemRepository::new();
        let clock_ins = InMemoryClockInRepository::new();
        let item_service = Arc::new(ItemService::new(Arc::new(items.clone()), pinned_clock(now())));
        let clock_in_service = Arc::new(ClockInService::new(
            Arc::new(clock_ins),
            pinned_clock(now()),
        ));
        let state = HttpState::new(
            item_service.clone(),
            item_service,
            clock_in_service.clone(),
            clock_in_service,
        );
        Self { items, state }
    }

    /// Initialise the application service.
    pub async fn service(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(self.state.clone()))
                .app_data(json_config())
                .app_data(query_config())
                .wrap(Trace)
                .service(items_scope())
                .service(clock_in_scope()),
        )
        .await
    }
}

/// Send `request` and decode the JSON body.
pub async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

/// Read a string field from a JSON object.
pub fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {name} in {body}"))
}
