//! MongoDB client lifecycle.
//!
//! One [`MongoStore`] is created at startup and shared by every repository.
//! The driver pools connections internally, so cloning the store is cheap and
//! all clones talk to the same pool. [`MongoStore::close`] shuts the pool
//! down and must run once on every exit path after a successful connect.

use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

use super::documents::{ClockInDocument, ItemDocument};

/// Errors raised while opening the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or the client not built.
    #[error("failed to configure MongoDB client: {message}")]
    Configure { message: String },

    /// The server did not answer the startup ping.
    #[error("MongoDB is unreachable: {message}")]
    Unreachable { message: String },
}

impl StoreError {
    /// Create a configuration error with the given message.
    pub fn configure(message: impl Into<String>) -> Self {
        Self::Configure {
            message: message.into(),
        }
    }

    /// Create an unreachable-server error with the given message.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Connection settings for the document store.
///
/// # Example
///
/// ```
/// use pantry::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017")
///     .with_database_name("pantry-test")
///     .with_items_collection("items_v2");
/// assert_eq!(config.database_name(), "pantry-test");
/// assert_eq!(config.clock_in_collection(), "clock_in");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database_name: String,
    items_collection: String,
    clock_in_collection: String,
}

impl StoreConfig {
    /// Default database name.
    pub const DEFAULT_DATABASE: &'static str = "fastapi-crud";
    /// Default collection holding items.
    pub const DEFAULT_ITEMS_COLLECTION: &'static str = "items";
    /// Default collection holding clock-in records.
    pub const DEFAULT_CLOCK_IN_COLLECTION: &'static str = "clock_in";

    /// Create a configuration for `uri` with default names.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: Self::DEFAULT_DATABASE.to_owned(),
            items_collection: Self::DEFAULT_ITEMS_COLLECTION.to_owned(),
            clock_in_collection: Self::DEFAULT_CLOCK_IN_COLLECTION.to_owned(),
        }
    }

    /// Set the database name.
    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = name.into();
        self
    }

    /// Set the items collection name.
    pub fn with_items_collection(mut self, name: impl Into<String>) -> Self {
        self.items_collection = name.into();
        self
    }

    /// Set the clock-in collection name.
    pub fn with_clock_in_collection(mut self, name: impl Into<String>) -> Self {
        self.clock_in_collection = name.into();
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database name.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Items collection name.
    pub fn items_collection(&self) -> &str {
        &self.items_collection
    }

    /// Clock-in collection name.
    pub fn clock_in_collection(&self) -> &str {
        &self.clock_in_collection
    }
}

/// Shared handle to the configured database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
    config: StoreConfig,
}

impl MongoStore {
    /// Build the client and verify the server answers `{ping: 1}`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configure`] for an unusable connection string
    /// and [`StoreError::Unreachable`] when the ping fails.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.uri())
            .await
            .map_err(|err| StoreError::configure(err.to_string()))?;
        let database = client.database(config.database_name());

        if let Err(err) = database.run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(StoreError::unreachable(err.to_string()));
        }

        info!(database = config.database_name(), "connected to MongoDB");
        Ok(Self {
            client,
            database,
            config,
        })
    }

    /// Typed handle on the items collection.
    pub fn items(&self) -> Collection<ItemDocument> {
        self.database.collection(self.config.items_collection())
    }

    /// Typed handle on the clock-in collection.
    pub fn clock_ins(&self) -> Collection<ClockInDocument> {
        self.database.collection(self.config.clock_in_collection())
    }

    /// Shut the connection pool down, waiting for in-flight operations.
    pub async fn close(self) {
        self.client.shutdown().await;
        debug!("MongoDB client closed");
    }
}
