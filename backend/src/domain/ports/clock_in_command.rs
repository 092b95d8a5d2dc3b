//! Driving port for clock-in mutations.

use async_trait::async_trait;

use crate::domain::{ClockIn, ClockInPatch, Error, NewClockIn, RecordId};

/// Driving port for clock-in write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClockInCommand: Send + Sync {
    /// Persist a new clock-in stamped with the current time.
    async fn create_clock_in(&self, clock_in: NewClockIn) -> Result<ClockIn, Error>;

    /// Apply `patch` and return the current record.
    async fn update_clock_in(&self, id: RecordId, patch: ClockInPatch) -> Result<ClockIn, Error>;

    /// Remove a clock-in record.
    async fn delete_clock_in(&self, id: RecordId) -> Result<(), Error>;
}
