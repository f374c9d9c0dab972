//! In-memory fake for the shipment gateway (testing and local runs)
//!
//! Provides `MemoryShipmentStore`, which satisfies the `ShipmentGateway`
//! contract without any external dependencies. Documents are enumerated in
//! insertion order.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::storage_traits::*;

#[derive(Debug, Default)]
struct Collections {
    sellers: Vec<Seller>,
    shipments: Vec<Shipment>,
}

/// In-memory record store backed by two `Vec`s.
///
/// `fail_with` arms a fault that every subsequent read returns, so callers
/// can exercise their store-failure paths.
#[derive(Debug, Default)]
pub struct MemoryShipmentStore {
    collections: Mutex<Collections>,
    fault: Mutex<Option<String>>,
}

impl MemoryShipmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `shipments`.
    pub fn with_shipments(shipments: impl IntoIterator<Item = Shipment>) -> Self {
        let store = Self::new();
        for shipment in shipments {
            store.insert_shipment(shipment);
        }
        store
    }

    pub fn insert_shipment(&self, shipment: Shipment) {
        self.collections.lock().unwrap().shipments.push(shipment);
    }

    pub fn insert_seller(&self, seller: Seller) {
        self.collections.lock().unwrap().sellers.push(seller);
    }

    /// Make every following read fail with `StorageError::Backend(reason)`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.fault.lock().unwrap() = Some(reason.into());
    }

    /// Clear an armed fault.
    pub fn heal(&self) {
        *self.fault.lock().unwrap() = None;
    }

    fn check_fault(&self) -> StorageResult<()> {
        match self.fault.lock().unwrap().as_ref() {
            Some(reason) => Err(StorageError::Backend(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ShipmentGateway for MemoryShipmentStore {
    async fn find(&self, filter: &ShipmentFilter) -> StorageResult<Vec<Shipment>> {
        self.check_fault()?;
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .shipments
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ShipmentFilter) -> StorageResult<u64> {
        self.check_fault()?;
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .shipments
            .iter()
            .filter(|s| filter.matches(s))
            .count() as u64)
    }

    async fn find_seller(&self, seller_id: &SellerId) -> StorageResult<Option<Seller>> {
        self.check_fault()?;
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .sellers
            .iter()
            .find(|s| &s.id == seller_id)
            .cloned())
    }
}
