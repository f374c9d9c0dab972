//! Structured observability hooks for the query surface.
//!
//! This module provides:
//! - A query-scoped tracing span for instrumenting query futures
//! - Emission functions for query outcomes: served, rejected, failed
//!
//! Events carry an `event` field so log pipelines can filter on it.

use tracing::{info, warn};

use crate::response::Operation;

/// Span carrying operation and seller for everything a query logs.
///
/// # Example
///
/// ```ignore
/// service.stats(seller).instrument(query_span(Operation::Stats, seller)).await
/// ```
pub fn query_span(operation: Operation, seller_id: Option<&str>) -> tracing::Span {
    tracing::info_span!(
        "shiptrack.query",
        operation = %operation,
        seller_id = seller_id.unwrap_or("-"),
    )
}

/// Emit event: a query produced a summary from `records` store documents.
pub fn emit_query_served(operation: Operation, seller_id: &str, records: u64) {
    info!(
        event = "query.served",
        operation = %operation,
        seller_id = %seller_id,
        records = records,
    );
}

/// Emit event: a query was rejected before touching the store.
pub fn emit_query_rejected(operation: Operation, reason: &dyn std::fmt::Display) {
    warn!(event = "query.rejected", operation = %operation, reason = %reason);
}

/// Emit event: a query failed inside the store or while shaping its result.
pub fn emit_query_failed(operation: Operation, error: &dyn std::fmt::Display) {
    tracing::error!(event = "query.failed", operation = %operation, error = %error);
}
