//! Fixture loading for development stores.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use shipment_store::{Seller, Shipment, SurrealShipmentStore};
use tracing::info;

/// Contents of a seed file: `{"sellers": [...], "shipments": [...]}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub sellers: Vec<Seller>,
    pub shipments: Vec<Shipment>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))
    }

    /// Insert every seller, then every shipment. Stops at the first failure.
    pub async fn apply(&self, store: &SurrealShipmentStore) -> Result<()> {
        for seller in &self.sellers {
            store
                .insert_seller(seller)
                .await
                .with_context(|| format!("Failed to insert seller {}", seller.id))?;
        }
        for shipment in &self.shipments {
            store
                .insert_shipment(shipment)
                .await
                .with_context(|| format!("Failed to insert shipment {}", shipment.id))?;
        }
        info!(
            sellers = self.sellers.len(),
            shipments = self.shipments.len(),
            "fixture applied"
        );
        Ok(())
    }
}
