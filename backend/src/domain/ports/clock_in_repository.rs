//! Driven port for clock-in persistence.

use async_trait::async_trait;

use crate::domain::{ClockIn, ClockInDraft, ClockInFilter, ClockInPatch, RecordId};

use super::{UpdateOutcome, define_port_error};

define_port_error! {
    /// Errors raised by clock-in repository adapters.
    pub enum ClockInRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "clock-in repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "clock-in repository query failed: {message}",
        /// A stored document could not be mapped onto a clock-in.
        Decode { message: String } =>
            "clock-in repository returned an undecodable document: {message}",
    }
}

/// Port for reading and writing records in the `clock_in` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClockInRepository: Send + Sync {
    /// Insert a new record and return its identifier.
    async fn insert(&self, draft: &ClockInDraft) -> Result<RecordId, ClockInRepositoryError>;

    /// Look a record up by identifier.
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<ClockIn>, ClockInRepositoryError>;

    /// List records matching every constraint in `filter`.
    async fn find(&self, filter: &ClockInFilter) -> Result<Vec<ClockIn>, ClockInRepositoryError>;

    /// Write the fields present in `patch`.
    async fn update(
        &self,
        id: &RecordId,
        patch: &ClockInPatch,
    ) -> Result<UpdateOutcome, ClockInRepositoryError>;

    /// Delete by identifier, returning whether a record was removed.
    async fn delete(&self, id: &RecordId) -> Result<bool, ClockInRepositoryError>;
}
