//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call;
//! driven ports (`*Repository`) are what outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod clock_in_command;
mod clock_in_query;
mod clock_in_repository;
mod item_command;
mod item_query;
mod item_repository;
mod update_outcome;

pub use clock_in_command::ClockInCommand;
#[cfg(test)]
pub use clock_in_command::MockClockInCommand;
pub use clock_in_query::ClockInQuery;
#[cfg(test)]
pub use clock_in_query::MockClockInQuery;
#[cfg(test)]
pub use clock_in_repository::MockClockInRepository;
pub use clock_in_repository::{ClockInRepository, ClockInRepositoryError};
pub use item_command::ItemCommand;
#[cfg(test)]
pub use item_command::MockItemCommand;
pub use item_query::ItemQuery;
#[cfg(test)]
pub use item_query::MockItemQuery;
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError};
pub use update_outcome::UpdateOutcome;
