//! In-memory repositories standing in for MongoDB.
//!
//! Records live in a `Vec` behind a mutex and identifiers are drawn from a
//! counter rendered as 24 lowercase hex digits, so they look and validate
//! like `ObjectId`s. Aggregation reuses [`aggregate_by_owner`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ClockInRepository, ClockInRepositoryError, ItemRepository, ItemRepositoryError, UpdateOutcome,
};
use crate::domain::{
    AggregatedItem, ClockIn, ClockInDraft, ClockInFilter, ClockInPatch, Item, ItemDraft,
    ItemFilter, ItemPatch, RecordId, aggregate_by_owner,
};

#[derive(Debug, Default)]
struct IdSequence(AtomicU64);

impl IdSequence {
    fn next(&self) -> String {
        format!("{:024x}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn update_in_place<T>(
    records: &mut [T],
    id: &RecordId,
    record_id: impl Fn(&T) -> &RecordId,
    apply: impl FnOnce(&mut T),
) -> UpdateOutcome
where
    T: PartialEq + Clone,
{
    match records.iter_mut().find(|record| record_id(record) == id) {
        Some(record) => {
            let before = record.clone();
            apply(record);
            UpdateOutcome {
                matched: 1,
                modified: u64::from(*record != before),
            }
        }
        None => UpdateOutcome::NOT_FOUND,
    }
}

/// In-memory items collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    records: Arc<Mutex<Vec<Item>>>,
    ids: Arc<IdSequence>,
}

impl InMemoryItemRepository {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored item, in insertion order.
    pub fn items(&self) -> Vec<Item> {
        lock(&self.records).clone()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, draft: &ItemDraft) -> Result<RecordId, ItemRepositoryError> {
        let id = RecordId::new(self.ids.next())
            .map_err(|err| ItemRepositoryError::query(err.to_string()))?;
        lock(&self.records).push(draft.clone().into_item(id.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .find(|item| &item.id == id)
            .cloned())
    }

    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: &ItemPatch,
    ) -> Result<UpdateOutcome, ItemRepositoryError> {
        let mut records = lock(&self.records);
        Ok(update_in_place(
            &mut records,
            id,
            |item| &item.id,
            |item| patch.apply_to(item),
        ))
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, ItemRepositoryError> {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|item| &item.id != id);
        Ok(records.len() < before)
    }

    async fn aggregate_by_owner(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<AggregatedItem>, ItemRepositoryError> {
        Ok(aggregate_by_owner(&lock(&self.records), now))
    }
}

/// In-memory clock-in collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryClockInRepository {
    records: Arc<Mutex<Vec<ClockIn>>>,
    ids: Arc<IdSequence>,
}

impl InMemoryClockInRepository {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClockInRepository for InMemoryClockInRepository {
    async fn insert(&self, draft: &ClockInDraft) -> Result<RecordId, ClockInRepositoryError> {
        let id = RecordId::new(self.ids.next())
            .map_err(|err| ClockInRepositoryError::query(err.to_string()))?;
        lock(&self.records).push(draft.clone().into_clock_in(id.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<ClockIn>, ClockInRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .find(|record| &record.id == id)
            .cloned())
    }

    async fn find(&self, filter: &ClockInFilter) -> Result<Vec<ClockIn>, ClockInRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: &ClockInPatch,
    ) -> Result<UpdateOutcome, ClockInRepositoryError> {
        let mut records = lock(&self.records);
        Ok(update_in_place(
            &mut records,
            id,
            |record| &record.id,
            |record| patch.apply_to(record),
        ))
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, ClockInRepositoryError> {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|record| &record.id != id);
        Ok(records.len() < before)
    }
}
