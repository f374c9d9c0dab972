//! Error types for shipment-store

use thiserror::Error;

/// Errors raised by a record store gateway.
///
/// These carry backend detail for logs; callers facing end users are
/// expected to replace them with a generic message.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Could not reach or authenticate against the backend
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// A query or write was rejected by the backend
    #[error("Database query failed: {0}")]
    Backend(String),

    /// Schema definition failed during start-up
    #[error("Schema setup failed: {0}")]
    SchemaSetup(String),

    /// A stored document could not be mapped onto a record type
    #[error("Malformed {table} document: {reason}")]
    Decode { table: &'static str, reason: String },

    /// A status string outside the closed status set
    #[error("Unknown shipment status: {0}")]
    UnknownStatus(String),
}

impl From<surrealdb::Error> for StorageError {
    fn from(err: surrealdb::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}
