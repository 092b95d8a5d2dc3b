//! Driven port for item persistence and the per-owner aggregation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AggregatedItem, Item, ItemDraft, ItemFilter, ItemPatch, RecordId};

use super::{UpdateOutcome, define_port_error};

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "item repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "item repository query failed: {message}",
        /// A stored document could not be mapped onto an item.
        Decode { message: String } =>
            "item repository returned an undecodable document: {message}",
    }
}

/// Port for reading and writing items in the `items` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item and return the identifier the store assigned.
    async fn insert(&self, draft: &ItemDraft) -> Result<RecordId, ItemRepositoryError>;

    /// Look an item up by identifier.
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Item>, ItemRepositoryError>;

    /// List items matching every constraint in `filter`.
    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Write the fields present in `patch`.
    async fn update(
        &self,
        id: &RecordId,
        patch: &ItemPatch,
    ) -> Result<UpdateOutcome, ItemRepositoryError>;

    /// Delete by identifier, returning whether a record was removed.
    async fn delete(&self, id: &RecordId) -> Result<bool, ItemRepositoryError>;

    /// Group items by owner and compute statistics relative to `now`,
    /// ordered by total quantity descending.
    async fn aggregate_by_owner(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<AggregatedItem>, ItemRepositoryError>;
}
