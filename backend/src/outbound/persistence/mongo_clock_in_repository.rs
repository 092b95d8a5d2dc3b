//! MongoDB-backed `ClockInRepository` implementation.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures_util::TryStreamExt;
use mongodb::Collection;

use crate::domain::ports::{ClockInRepository, ClockInRepositoryError, UpdateOutcome};
use crate::domain::{ClockIn, ClockInDraft, ClockInFilter, ClockInPatch, RecordId};

use super::documents::{ClockInDocument, DocumentError, object_id, record_id};
use super::error_mapping::map_mongo_error;
use super::queries::{clock_in_filter, clock_in_update};
use super::store::MongoStore;

/// Repository over the clock-in collection.
#[derive(Clone)]
pub struct MongoClockInRepository {
    collection: Collection<ClockInDocument>,
}

impl MongoClockInRepository {
    /// Create a repository bound to the store's clock-in collection.
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.clock_ins(),
        }
    }
}

fn map_error(error: mongodb::error::Error) -> ClockInRepositoryError {
    map_mongo_error(
        error,
        ClockInRepositoryError::query,
        ClockInRepositoryError::connection,
        ClockInRepositoryError::decode,
    )
}

fn map_document_error(error: DocumentError) -> ClockInRepositoryError {
    ClockInRepositoryError::decode(error.to_string())
}

fn by_id(id: &RecordId) -> Result<bson::Document, ClockInRepositoryError> {
    let oid: ObjectId =
        object_id(id).map_err(|err| ClockInRepositoryError::query(err.to_string()))?;
    Ok(doc! { "_id": oid })
}

#[async_trait]
impl ClockInRepository for MongoClockInRepository {
    async fn insert(&self, draft: &ClockInDraft) -> Result<RecordId, ClockInRepositoryError> {
        let result = self
            .collection
            .insert_one(ClockInDocument::from(draft))
            .await
            .map_err(map_error)?;
        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            ClockInRepositoryError::decode(format!(
                "inserted id is not an ObjectId: {}",
                result.inserted_id
            ))
        })?;
        record_id(oid).map_err(map_document_error)
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<ClockIn>, ClockInRepositoryError> {
        self.collection
            .find_one(by_id(id)?)
            .await
            .map_err(map_error)?
            .map(ClockIn::try_from)
            .transpose()
            .map_err(map_document_error)
    }

    async fn find(&self, filter: &ClockInFilter) -> Result<Vec<ClockIn>, ClockInRepositoryError> {
        let documents: Vec<ClockInDocument> = self
            .collection
            .find(clock_in_filter(filter))
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        documents
            .into_iter()
            .map(ClockIn::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_document_error)
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: &ClockInPatch,
    ) -> Result<UpdateOutcome, ClockInRepositoryError> {
        let result = self
            .collection
            .update_one(by_id(id)?, clock_in_update(patch))
            .await
            .map_err(map_error)?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, ClockInRepositoryError> {
        let result = self
            .collection
            .delete_one(by_id(id)?)
            .await
            .map_err(map_error)?;
        Ok(result.deleted_count > 0)
    }
}
