//! MongoDB persistence adapters.
//!
//! This module provides concrete implementations of the repository ports
//! backed by MongoDB through the official async driver.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between BSON documents
//!   and domain types. No business logic resides here.
//! - **Internal documents**: document structs (`documents.rs`) and the
//!   filter, update and pipeline builders are implementation details, never
//!   exposed to the domain layer.
//! - **Shared client**: every repository borrows collections from one
//!   [`MongoStore`], whose driver pool is shared by all clones.
//! - **Strongly typed errors**: driver errors are mapped to the port error
//!   enums.
//!
//! # Example
//!
//! ```no_run
//! use pantry::outbound::persistence::{MongoItemRepository, MongoStore, StoreConfig};
//!
//! # async fn example() -> Result<(), pantry::outbound::persistence::StoreError> {
//! let store = MongoStore::connect(StoreConfig::new("mongodb://localhost:27017")).await?;
//! let items = MongoItemRepository::new(&store);
//! # drop(items);
//! store.close().await;
//! # Ok(())
//! # }
//! ```

mod documents;
mod error_mapping;
mod item_aggregation;
mod mongo_clock_in_repository;
mod mongo_item_repository;
mod queries;
mod store;

pub use item_aggregation::owner_statistics_pipeline;
pub use mongo_clock_in_repository::MongoClockInRepository;
pub use mongo_item_repository::MongoItemRepository;
pub use store::{MongoStore, StoreConfig, StoreError};
