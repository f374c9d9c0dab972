//! Derived summary shapes: monthly buckets, status counts, alerts.

use serde::{Deserialize, Serialize};
use shipment_store::ShipmentId;

/// Number of shipments created in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    /// Abbreviated English month name, e.g. "Jan"
    pub month: String,
    pub shipments: u64,
}

/// Per-status shipment counts for one seller.
///
/// `total` includes `Shipped` and `Delivered` shipments, which appear in
/// neither `pending` nor `completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: u64,
    pub pending: u64,
    pub completed: u64,
}

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
}

/// A human-readable notice about one shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Identity of the shipment the alert is about
    pub id: ShipmentId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
}
