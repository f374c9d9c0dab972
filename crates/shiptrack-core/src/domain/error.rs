//! Error taxonomy for seller-scoped queries.

use shipment_store::StorageError;

/// A request was rejected before the store was touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Seller ID is required")]
    MissingSellerId,
}

/// Errors produced by the query service.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("store error: {0}")]
    Store(#[from] StorageError),
}

impl QueryError {
    /// HTTP-equivalent status for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            QueryError::Validation(_) => 400,
            QueryError::Store(_) => 500,
        }
    }

    /// The message a client is allowed to see. Store detail never leaks.
    pub fn public_message(&self) -> String {
        match self {
            QueryError::Validation(err) => err.to_string(),
            QueryError::Store(_) => "Server error".to_string(),
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
