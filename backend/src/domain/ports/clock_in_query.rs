//! Driving port for clock-in reads.

use async_trait::async_trait;

use crate::domain::{ClockIn, ClockInFilter, Error, RecordId};

/// Driving port for clock-in read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClockInQuery: Send + Sync {
    /// Fetch one clock-in by identifier.
    async fn get_clock_in(&self, id: RecordId) -> Result<ClockIn, Error>;

    /// List clock-ins matching `filter`.
    async fn filter_clock_ins(&self, filter: ClockInFilter) -> Result<Vec<ClockIn>, Error>;
}
