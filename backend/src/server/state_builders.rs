//! Builders wiring MongoDB repositories into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use pantry::domain::{ClockInService, ItemService};
use pantry::inbound::http::state::HttpState;
use pantry::outbound::persistence::{MongoClockInRepository, MongoItemRepository, MongoStore};

/// Build the HTTP state from a connected store, sharing one clock across
/// both services.
pub fn build_http_state(store: &MongoStore) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let items = Arc::new(ItemService::new(
        Arc::new(MongoItemRepository::new(store)),
        Arc::clone(&clock),
    ));
    let clock_ins = Arc::new(ClockInService::new(
        Arc::new(MongoClockInRepository::new(store)),
        clock,
    ));
    HttpState::new(items.clone(), items, clock_ins.clone(), clock_ins)
}
