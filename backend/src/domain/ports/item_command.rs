//! Driving port for item mutations.
//!
//! Inbound adapters create, patch, and delete items through this port
//! without knowing how the records are stored.

use async_trait::async_trait;

use crate::domain::{Error, Item, ItemPatch, NewItem, RecordId};

/// Driving port for item write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCommand: Send + Sync {
    /// Persist a new item and return it as stored, including the assigned
    /// identifier and insertion timestamp.
    async fn create_item(&self, item: NewItem) -> Result<Item, Error>;

    /// Apply `patch` to an existing item and return the current record.
    ///
    /// Fails with `not_found` when `id` matches nothing.
    async fn update_item(&self, id: RecordId, patch: ItemPatch) -> Result<Item, Error>;

    /// Remove an item. Fails with `not_found` when `id` matches nothing.
    async fn delete_item(&self, id: RecordId) -> Result<(), Error>;
}
