//! Storage trait definitions for shipment tracking
//!
//! - `Shipment` / `Seller`: the records the gateway hands out
//! - `ShipmentFilter`: seller-scoped selection, optionally narrowed by status
//! - `ShipmentGateway`: read-only find/count over the record store
//!
//! The trait is async and backend-agnostic. An in-memory fake lives in the
//! `fakes` module and a SurrealDB implementation in `surreal_gateway`.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Store-assigned identity of a shipment document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentId(pub String);

impl ShipmentId {
    /// Generate a new random ShipmentId
    pub fn new() -> Self {
        ShipmentId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque seller identity used to scope every query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SellerId(pub String);

impl SellerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SellerId {
    fn from(s: &str) -> Self {
        SellerId(s.to_string())
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ShipmentStatus
// ---------------------------------------------------------------------------

/// Shipment workflow status.
///
/// Declared lifecycle: `Pending → Shipped → Delivered → Completed`, terminal
/// at `Completed`. Readers treat the status as data; only the write path
/// consults [`ShipmentStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Pending,
    Shipped,
    Delivered,
    Completed,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 4] = [
        ShipmentStatus::Pending,
        ShipmentStatus::Shipped,
        ShipmentStatus::Delivered,
        ShipmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::Shipped => "Shipped",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Completed => "Completed",
        }
    }

    /// The single forward step allowed from this status, if any.
    pub fn next(&self) -> Option<ShipmentStatus> {
        match self {
            ShipmentStatus::Pending => Some(ShipmentStatus::Shipped),
            ShipmentStatus::Shipped => Some(ShipmentStatus::Delivered),
            ShipmentStatus::Delivered => Some(ShipmentStatus::Completed),
            ShipmentStatus::Completed => None,
        }
    }

    pub fn can_transition_to(&self, target: ShipmentStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl FromStr for ShipmentStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StorageError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A cross-border shipment belonging to one seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(default)]
    pub id: ShipmentId,
    /// Seller-facing order reference, not unique
    pub order_id: String,
    pub product_type: String,
    /// Kilograms
    pub weight: f64,
    pub destination: String,
    pub status: ShipmentStatus,
    pub cost: f64,
    pub seller_id: SellerId,
    /// Absent on malformed documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Shipment {
    /// Create a shipment with a fresh id, no creation time, and zeroed
    /// weight and cost.
    pub fn new(
        seller_id: SellerId,
        order_id: impl Into<String>,
        destination: impl Into<String>,
        status: ShipmentStatus,
    ) -> Self {
        Shipment {
            id: ShipmentId::new(),
            order_id: order_id.into(),
            product_type: "General".to_string(),
            weight: 0.0,
            destination: destination.into(),
            status,
            cost: 0.0,
            seller_id,
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_cargo(mut self, product_type: impl Into<String>, weight: f64, cost: f64) -> Self {
        self.product_type = product_type.into();
        self.weight = weight;
        self.cost = cost;
        self
    }
}

/// A seller account. Read-only from the perspective of this crate's readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    pub store_name: String,
    pub category: String,
}

// ---------------------------------------------------------------------------
// ShipmentFilter
// ---------------------------------------------------------------------------

/// Selection over shipments. Always scoped to exactly one seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentFilter {
    seller_id: SellerId,
    status: Option<ShipmentStatus>,
}

impl ShipmentFilter {
    /// Every shipment owned by `seller_id`.
    pub fn seller(seller_id: SellerId) -> Self {
        Self {
            seller_id,
            status: None,
        }
    }

    /// Narrow the selection to one status.
    pub fn with_status(mut self, status: ShipmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    pub fn status(&self) -> Option<ShipmentStatus> {
        self.status
    }

    pub fn matches(&self, shipment: &Shipment) -> bool {
        shipment.seller_id == self.seller_id
            && self.status.map(|s| shipment.status == s).unwrap_or(true)
    }
}

// ---------------------------------------------------------------------------
// ShipmentGateway
// ---------------------------------------------------------------------------

/// Read-only access to the shipment record store.
///
/// Guarantees:
/// - `find` returns only documents matching the filter, in insertion order.
/// - `count(f)` equals `find(f).len()` against the same store state.
/// - Neither call mutates the store.
#[async_trait]
pub trait ShipmentGateway: Send + Sync {
    /// All shipments matching the filter.
    async fn find(&self, filter: &ShipmentFilter) -> StorageResult<Vec<Shipment>>;

    /// Number of shipments matching the filter.
    async fn count(&self, filter: &ShipmentFilter) -> StorageResult<u64>;

    /// Look up a seller by id. `Ok(None)` if the seller is unknown.
    async fn find_seller(&self, seller_id: &SellerId) -> StorageResult<Option<Seller>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_only_known_values() {
        for status in ShipmentStatus::ALL {
            assert_eq!(status.as_str().parse::<ShipmentStatus>().unwrap(), status);
        }
        let err = "Lost".parse::<ShipmentStatus>().unwrap_err();
        assert!(matches!(err, StorageError::UnknownStatus(ref s) if s == "Lost"));
        assert!("pending".parse::<ShipmentStatus>().is_err());
    }

    #[test]
    fn status_lifecycle_moves_forward_only() {
        assert!(ShipmentStatus::Pending.can_transition_to(ShipmentStatus::Shipped));
        assert!(ShipmentStatus::Shipped.can_transition_to(ShipmentStatus::Delivered));
        assert!(ShipmentStatus::Delivered.can_transition_to(ShipmentStatus::Completed));
        assert!(!ShipmentStatus::Shipped.can_transition_to(ShipmentStatus::Pending));
        assert!(!ShipmentStatus::Pending.can_transition_to(ShipmentStatus::Completed));
        assert!(ShipmentStatus::Completed.is_terminal());
        assert!(!ShipmentStatus::Delivered.is_terminal());
    }

    #[test]
    fn shipment_json_uses_camel_case_and_tolerates_missing_created_at() {
        let raw = r#"{
            "id": "s-1",
            "orderId": "ORD-7",
            "productType": "Textiles",
            "weight": 2.5,
            "destination": "Lagos",
            "status": "Pending",
            "cost": 40.0,
            "sellerId": "seller-a"
        }"#;
        let shipment: Shipment = serde_json::from_str(raw).unwrap();
        assert_eq!(shipment.id, ShipmentId("s-1".into()));
        assert_eq!(shipment.seller_id, SellerId::from("seller-a"));
        assert!(shipment.created_at.is_none());

        let json = serde_json::to_value(&shipment).unwrap();
        assert_eq!(json["orderId"], "ORD-7");
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn shipment_json_rejects_unknown_status() {
        let raw = r#"{"orderId":"1","productType":"x","weight":1,"destination":"y",
                      "status":"Lost","cost":1,"sellerId":"a"}"#;
        assert!(serde_json::from_str::<Shipment>(raw).is_err());
    }

    #[test]
    fn filter_matches_scope_and_status() {
        let mine = Shipment::new("a".into(), "1", "Oslo", ShipmentStatus::Pending);
        let other = Shipment::new("b".into(), "2", "Oslo", ShipmentStatus::Pending);

        let all = ShipmentFilter::seller("a".into());
        assert!(all.matches(&mine));
        assert!(!all.matches(&other));

        let completed = all.clone().with_status(ShipmentStatus::Completed);
        assert!(!completed.matches(&mine));
        assert_eq!(completed.status(), Some(ShipmentStatus::Completed));
    }
}
