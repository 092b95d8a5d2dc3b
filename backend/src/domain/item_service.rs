//! Item domain service.
//!
//! Implements the item driving ports over an [`ItemRepository`]. The service
//! owns the server-side timestamps: `insert_date` on creation and the "now"
//! used by the aggregation's expiry classification.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{ItemCommand, ItemQuery, ItemRepository, ItemRepositoryError};
use crate::domain::{AggregatedItem, Error, Item, ItemFilter, ItemPatch, NewItem, RecordId};

const ITEM_NOT_FOUND_FOR_ID: &str = "Item not found in this item_id";
const ITEM_NOT_FOUND: &str = "Item not found";
const AGGREGATION_FAILED: &str = "Error aggregating items";

fn map_repository_error(error: ItemRepositoryError) -> Error {
    error!(error = %error, "item repository call failed");
    match error {
        ItemRepositoryError::Connection { .. } => {
            Error::service_unavailable("item store unavailable")
        }
        ItemRepositoryError::Query { .. } | ItemRepositoryError::Decode { .. } => {
            Error::internal("item store error")
        }
    }
}

/// Item service implementing [`ItemCommand`] and [`ItemQuery`].
#[derive(Clone)]
pub struct ItemService<R> {
    item_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ItemService<R> {
    /// Create a new service over the item repository.
    pub fn new(item_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { item_repo, clock }
    }
}

impl<R> ItemService<R>
where
    R: ItemRepository,
{
    async fn fetch(&self, id: &RecordId, missing: &'static str) -> Result<Item, Error> {
        self.item_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(missing))
    }
}

#[async_trait]
impl<R> ItemCommand for ItemService<R>
where
    R: ItemRepository,
{
    async fn create_item(&self, item: NewItem) -> Result<Item, Error> {
        let draft = item.into_draft(self.clock.utc());
        let id = self
            .item_repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        debug!(item_id = %id, "item created");

        self.item_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                error!(item_id = %id, "inserted item missing on re-read");
                Error::internal("item store error")
            })
    }

    async fn update_item(&self, id: RecordId, patch: ItemPatch) -> Result<Item, Error> {
        if !patch.is_empty() {
            let outcome = self
                .item_repo
                .update(&id, &patch)
                .await
                .map_err(map_repository_error)?;
            if !outcome.found() {
                return Err(Error::not_found(ITEM_NOT_FOUND_FOR_ID));
            }
            debug!(item_id = %id, modified = outcome.modified, "item updated");
        }
        self.fetch(&id, ITEM_NOT_FOUND_FOR_ID).await
    }

    async fn delete_item(&self, id: RecordId) -> Result<(), Error> {
        let deleted = self
            .item_repo
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(ITEM_NOT_FOUND));
        }
        debug!(item_id = %id, "item deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> ItemQuery for ItemService<R>
where
    R: ItemRepository,
{
    async fn get_item(&self, id: RecordId) -> Result<Item, Error> {
        self.fetch(&id, ITEM_NOT_FOUND_FOR_ID).await
    }

    async fn filter_items(&self, filter: ItemFilter) -> Result<Vec<Item>, Error> {
        self.item_repo
            .find(&filter)
            .await
            .map_err(map_repository_error)
    }

    async fn aggregate_items(&self) -> Result<Vec<AggregatedItem>, Error> {
        let now = self.clock.utc();
        self.item_repo
            .aggregate_by_owner(now)
            .await
            .map_err(|err| {
                error!(error = %err, "item aggregation failed");
                Error::internal(AGGREGATION_FAILED)
            })
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
