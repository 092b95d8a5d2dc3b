//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ClockInCommand, ClockInQuery, ItemCommand, ItemQuery};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use pantry::domain::{ClockInService, ItemService};
/// use pantry::inbound::http::state::HttpState;
/// use pantry::test_support::memory::{InMemoryClockInRepository, InMemoryItemRepository};
///
/// let items = Arc::new(ItemService::new(
///     Arc::new(InMemoryItemRepository::new()),
///     Arc::new(DefaultClock),
/// ));
/// let clock_ins = Arc::new(ClockInService::new(
///     Arc::new(InMemoryClockInRepository::new()),
///     Arc::new(DefaultClock),
/// ));
/// let state = HttpState::new(items.clone(), items, clock_ins.clone(), clock_ins);
/// let _items = state.items.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub items: Arc<dyn ItemCommand>,
    pub items_query: Arc<dyn ItemQuery>,
    pub clock_ins: Arc<dyn ClockInCommand>,
    pub clock_ins_query: Arc<dyn ClockInQuery>,
}

impl HttpState {
    /// Construct state from the four driving ports.
    pub fn new(
        items: Arc<dyn ItemCommand>,
        items_query: Arc<dyn ItemQuery>,
        clock_ins: Arc<dyn ClockInCommand>,
        clock_ins_query: Arc<dyn ClockInQuery>,
    ) -> Self {
        Self {
            items,
            items_query,
            clock_ins,
            clock_ins_query,
        }
    }
}
