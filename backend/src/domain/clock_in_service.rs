//! Clock-in domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{
    ClockInCommand, ClockInQuery, ClockInRepository, ClockInRepositoryError,
};
use crate::domain::{ClockIn, ClockInFilter, ClockInPatch, Error, NewClockIn, RecordId};

const CLOCK_IN_NOT_FOUND: &str = "Clock-in record not found";
const CLOCK_IN_NOT_FOUND_FOR_ID: &str = "Clock-in record not found in this id";

fn map_repository_error(error: ClockInRepositoryError) -> Error {
    error!(error = %error, "clock-in repository call failed");
    match error {
        ClockInRepositoryError::Connection { .. } => {
            Error::service_unavailable("clock-in store unavailable")
        }
        ClockInRepositoryError::Query { .. } | ClockInRepositoryError::Decode { .. } => {
            Error::internal("clock-in store error")
        }
    }
}

/// Clock-in service implementing [`ClockInCommand`] and [`ClockInQuery`].
#[derive(Clone)]
pub struct ClockInService<R> {
    clock_in_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ClockInService<R> {
    /// Create a new service over the clock-in repository.
    pub fn new(clock_in_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock_in_repo,
            clock,
        }
    }
}

impl<R> ClockInService<R>
where
    R: ClockInRepository,
{
    async fn fetch(&self, id: &RecordId, missing: &'static str) -> Result<ClockIn, Error> {
        self.clock_in_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(missing))
    }
}

#[async_trait]
impl<R> ClockInCommand for ClockInService<R>
where
    R: ClockInRepository,
{
    async fn create_clock_in(&self, clock_in: NewClockIn) -> Result<ClockIn, Error> {
        let draft = clock_in.into_draft(self.clock.utc());
        let id = self
            .clock_in_repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        debug!(clock_in_id = %id, "clock-in recorded");

        self.clock_in_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                error!(clock_in_id = %id, "inserted clock-in missing on re-read");
                Error::internal("clock-in store error")
            })
    }

    async fn update_clock_in(&self, id: RecordId, patch: ClockInPatch) -> Result<ClockIn, Error> {
        if !patch.is_empty() {
            let outcome = self
                .clock_in_repo
                .update(&id, &patch)
                .await
                .map_err(map_repository_error)?;
            if !outcome.found() {
                return Err(Error::not_found(CLOCK_IN_NOT_FOUND_FOR_ID));
            }
        }
        self.fetch(&id, CLOCK_IN_NOT_FOUND_FOR_ID).await
    }

    async fn delete_clock_in(&self, id: RecordId) -> Result<(), Error> {
        let deleted = self
            .clock_in_repo
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(CLOCK_IN_NOT_FOUND))
        }
    }
}

#[async_trait]
impl<R> ClockInQuery for ClockInService<R>
where
    R: ClockInRepository,
{
    async fn get_clock_in(&self, id: RecordId) -> Result<ClockIn, Error> {
        self.fetch(&id, CLOCK_IN_NOT_FOUND).await
    }

    async fn filter_clock_ins(&self, filter: ClockInFilter) -> Result<Vec<ClockIn>, Error> {
        self.clock_in_repo
            .find(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "clock_in_service_tests.rs"]
mod tests;
