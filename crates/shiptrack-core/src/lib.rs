//! Shiptrack Core Library
//!
//! Turns a seller's shipment records into the summaries the dashboard
//! shows: monthly volume, status counts, and pending-shipment alerts.
//!
//! - [`aggregation`]: pure functions over `&[Shipment]`
//! - [`query`]: seller-scoped reads through a [`shipment_store::ShipmentGateway`]
//! - [`response`]: response bodies and the shared failure mapping

pub mod aggregation;
pub mod domain;
pub mod obs;
pub mod query;
pub mod response;
pub mod telemetry;

pub use aggregation::{month_label, monthly_volume, pending_alerts, status_counts};

pub use domain::{
    Alert, AlertKind, MonthlyVolume, QueryError, Result, StatusCounts, ValidationError,
};

pub use query::{require_seller, QueryService};

pub use response::{
    failure_response, AlertsResponse, AnalyticsResponse, FailureBody, Operation, Reply,
    StatsResponse,
};

pub use obs::{emit_query_failed, emit_query_rejected, emit_query_served, query_span};
pub use telemetry::init_tracing;

/// Shiptrack version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
