//! Driving port for item reads and the per-owner aggregation.

use async_trait::async_trait;

use crate::domain::{AggregatedItem, Error, Item, ItemFilter, RecordId};

/// Driving port for item read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemQuery: Send + Sync {
    /// Fetch one item by identifier.
    async fn get_item(&self, id: RecordId) -> Result<Item, Error>;

    /// List items matching `filter`. An empty filter lists everything.
    async fn filter_items(&self, filter: ItemFilter) -> Result<Vec<Item>, Error>;

    /// Per-owner statistics, largest total quantity first.
    async fn aggregate_items(&self) -> Result<Vec<AggregatedItem>, Error>;
}
