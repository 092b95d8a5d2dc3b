//! Shared MongoDB error mapping for repository adapters.

use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

/// Map a driver error onto a repository-specific error.
///
/// Server selection, I/O and pool-cleared failures mean the store is out of
/// reach and map to `connection`; BSON decoding failures map to `decode`;
/// everything else maps to `query`.
pub fn map_mongo_error<E, Q, C, D>(error: MongoError, query: Q, connection: C, decode: D) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
    D: FnOnce(String) -> E,
{
    debug!(error = %error, "mongodb operation failed");
    let message = error.to_string();
    match *error.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Shutdown => connection(message),
        ErrorKind::BsonDeserialization(_) => decode(message),
        _ => query(message),
    }
}
