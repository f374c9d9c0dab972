//! Document shapes for the SurrealDB tables
//!
//! Tables:
//! - shipments: one document per shipment, scoped by `sellerId`
//! - sellers: seller accounts referenced by shipments
//!
//! Rows keep the status as a plain string; it is mapped onto
//! `ShipmentStatus` in `TryFrom<ShipmentRow>`, and an unknown value is a
//! `StorageError::Decode`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage_traits::{Seller, SellerId, Shipment, ShipmentId, ShipmentStatus};

/// Serialize optional chrono DateTime as a SurrealDB datetime
mod surreal_datetime_opt {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};
    use surrealdb::sql::Datetime as SurrealDatetime;

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => {
                let sd = SurrealDatetime::from(*d);
                serde::Serialize::serialize(&Some(sd), serializer)
            }
            None => serde::Serialize::serialize(&None::<SurrealDatetime>, serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sd = Option::<SurrealDatetime>::deserialize(deserializer)?;
        Ok(sd.map(DateTime::from))
    }
}

/// Shipment document stored in SurrealDB
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRow {
    /// SurrealDB record ID, assigned from the insertion counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<surrealdb::sql::Thing>,
    /// Stable shipment identity exposed to callers
    pub shipment_id: String,
    pub order_id: String,
    pub product_type: String,
    pub weight: f64,
    pub destination: String,
    /// One of "Pending" | "Shipped" | "Delivered" | "Completed"
    pub status: String,
    pub cost: f64,
    pub seller_id: String,
    #[serde(default, with = "surreal_datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Shipment> for ShipmentRow {
    fn from(shipment: &Shipment) -> Self {
        ShipmentRow {
            id: None,
            shipment_id: shipment.id.0.clone(),
            order_id: shipment.order_id.clone(),
            product_type: shipment.product_type.clone(),
            weight: shipment.weight,
            destination: shipment.destination.clone(),
            status: shipment.status.as_str().to_string(),
            cost: shipment.cost,
            seller_id: shipment.seller_id.0.clone(),
            created_at: shipment.created_at,
        }
    }
}

impl TryFrom<ShipmentRow> for Shipment {
    type Error = StorageError;

    fn try_from(row: ShipmentRow) -> Result<Self, Self::Error> {
        let status: ShipmentStatus = row.status.parse().map_err(|_| StorageError::Decode {
            table: "shipments",
            reason: format!(
                "shipment {} has unknown status {:?}",
                row.shipment_id, row.status
            ),
        })?;

        Ok(Shipment {
            id: ShipmentId(row.shipment_id),
            order_id: row.order_id,
            product_type: row.product_type,
            weight: row.weight,
            destination: row.destination,
            status,
            cost: row.cost,
            seller_id: SellerId(row.seller_id),
            created_at: row.created_at,
        })
    }
}

/// Seller document stored in SurrealDB
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerRow {
    /// SurrealDB record ID
    pub id: Option<surrealdb::sql::Thing>,
    pub seller_id: String,
    pub name: String,
    pub store_name: String,
    pub category: String,
}

impl From<&Seller> for SellerRow {
    fn from(seller: &Seller) -> Self {
        SellerRow {
            id: None,
            seller_id: seller.id.0.clone(),
            name: seller.name.clone(),
            store_name: seller.store_name.clone(),
            category: seller.category.clone(),
        }
    }
}

impl From<SellerRow> for Seller {
    fn from(row: SellerRow) -> Self {
        Seller {
            id: SellerId(row.seller_id),
            name: row.name,
            store_name: row.store_name,
            category: row.category,
        }
    }
}

/// Result row of a `SELECT count() AS total ... GROUP ALL` query
#[derive(Debug, Deserialize)]
pub struct CountRow {
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn shipment_row_round_trips_through_domain_record() {
        let created = Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap();
        let shipment = Shipment::new("seller-a".into(), "ORD-1", "Nairobi", ShipmentStatus::Shipped)
            .with_cargo("Electronics", 3.2, 120.0)
            .with_created_at(created);

        let row = ShipmentRow::from(&shipment);
        assert_eq!(row.status, "Shipped");
        assert_eq!(row.seller_id, "seller-a");

        let back = Shipment::try_from(row).unwrap();
        assert_eq!(back, shipment);
    }

    #[test]
    fn shipment_row_with_unknown_status_is_a_decode_error() {
        let mut row = ShipmentRow::from(&Shipment::new(
            "seller-a".into(),
            "ORD-2",
            "Lima",
            ShipmentStatus::Pending,
        ));
        row.status = "Returned".to_string();

        let err = Shipment::try_from(row).unwrap_err();
        assert!(matches!(err, StorageError::Decode { table: "shipments", .. }));
    }
}
