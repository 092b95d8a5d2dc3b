//! MongoDB-backed `ItemRepository` implementation.

use async_trait::async_trait;
use bson::doc;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::Collection;

use crate::domain::ports::{ItemRepository, ItemRepositoryError, UpdateOutcome};
use crate::domain::{AggregatedItem, Item, ItemDraft, ItemFilter, ItemPatch, RecordId};

use super::documents::{AggregatedItemDocument, DocumentError, ItemDocument, object_id, record_id};
use super::error_mapping::map_mongo_error;
use super::item_aggregation::owner_statistics_pipeline;
use super::queries::{item_filter, item_update};
use super::store::MongoStore;

/// Repository over the items collection.
#[derive(Clone)]
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    /// Create a repository bound to the store's items collection.
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.items(),
        }
    }
}

fn map_error(error: mongodb::error::Error) -> ItemRepositoryError {
    map_mongo_error(
        error,
        ItemRepositoryError::query,
        ItemRepositoryError::connection,
        ItemRepositoryError::decode,
    )
}

fn map_document_error(error: DocumentError) -> ItemRepositoryError {
    ItemRepositoryError::decode(error.to_string())
}

fn to_object_id(id: &RecordId) -> Result<bson::oid::ObjectId, ItemRepositoryError> {
    object_id(id).map_err(|err| ItemRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    async fn insert(&self, draft: &ItemDraft) -> Result<RecordId, ItemRepositoryError> {
        let result = self
            .collection
            .insert_one(ItemDocument::from(draft))
            .await
            .map_err(map_error)?;
        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            ItemRepositoryError::decode(format!(
                "inserted id is not an ObjectId: {}",
                result.inserted_id
            ))
        })?;
        record_id(oid).map_err(map_document_error)
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Item>, ItemRepositoryError> {
        let document = self
            .collection
            .find_one(doc! { "_id": to_object_id(id)? })
            .await
            .map_err(map_error)?;
        document
            .map(Item::try_from)
            .transpose()
            .map_err(map_document_error)
    }

    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, ItemRepositoryError> {
        let documents: Vec<ItemDocument> = self
            .collection
            .find(item_filter(filter))
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        documents
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_document_error)
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: &ItemPatch,
    ) -> Result<UpdateOutcome, ItemRepositoryError> {
        let result = self
            .collection
            .update_one(doc! { "_id": to_object_id(id)? }, item_update(patch))
            .await
            .map_err(map_error)?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, ItemRepositoryError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": to_object_id(id)? })
            .await
            .map_err(map_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn aggregate_by_owner(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<AggregatedItem>, ItemRepositoryError> {
        let documents: Vec<bson::Document> = self
            .collection
            .aggregate(owner_statistics_pipeline(now))
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;

        documents
            .into_iter()
            .map(|document| {
                let decoded: AggregatedItemDocument = bson::from_document(document)
                    .map_err(|err| ItemRepositoryError::decode(err.to_string()))?;
                AggregatedItem::try_from(decoded).map_err(map_document_error)
            })
            .collect()
    }
}
