//! SurrealDB-backed ShipmentGateway implementation
//!
//! Uses `schema::ShipmentRow` and `schema::SellerRow` for persistence,
//! converting to/from `storage_traits` records at the boundary.

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::handle::{self, StoreLocation};
use crate::migrations;
use crate::schema::{CountRow, SellerRow, ShipmentRow};
use crate::storage_traits::{
    Seller, SellerId, Shipment, ShipmentFilter, ShipmentGateway, StorageResult,
};

const INSERT_SHIPMENT: &str = r#"
    BEGIN TRANSACTION;
    LET $seq = (UPSERT ONLY shipment_sequence:insertion SET last += 1);
    CREATE type::thing('shipments', $seq.last) CONTENT $row;
    COMMIT TRANSACTION;
"#;

/// SurrealDB-backed implementation of [`ShipmentGateway`].
#[derive(Clone)]
pub struct SurrealShipmentStore {
    db: Surreal<Any>,
}

impl SurrealShipmentStore {
    /// Connect to `location` and make sure the schema exists.
    pub async fn open(location: &StoreLocation) -> StorageResult<Self> {
        let db = handle::connect(location).await?;
        migrations::init_schema(&db).await?;
        info!("SurrealShipmentStore ready");
        Ok(Self { db })
    }

    /// Create an in-memory instance for testing.
    pub async fn in_memory() -> StorageResult<Self> {
        Self::open(&StoreLocation::Memory).await
    }

    /// Connect using the location resolved by [`StoreLocation::from_env`].
    pub async fn from_env() -> StorageResult<Self> {
        Self::open(&StoreLocation::from_env()).await
    }

    // ========== Write helpers (seeding, tests) ==========

    /// Store a seller document.
    #[instrument(skip(self, seller), fields(seller_id = %seller.id))]
    pub async fn insert_seller(&self, seller: &Seller) -> StorageResult<()> {
        debug!("Saving seller");
        let _created: Option<SellerRow> = self
            .db
            .create("sellers")
            .content(SellerRow::from(seller))
            .await?;
        Ok(())
    }

    /// Store a shipment document.
    ///
    /// The record id is the next value of the insertion counter, bumped in
    /// the same transaction as the create.
    #[instrument(skip(self, shipment), fields(shipment_id = %shipment.id, seller_id = %shipment.seller_id))]
    pub async fn insert_shipment(&self, shipment: &Shipment) -> StorageResult<()> {
        debug!("Saving shipment");
        self.db
            .query(INSERT_SHIPMENT)
            .bind(("row", ShipmentRow::from(shipment)))
            .await?
            .check()?;
        Ok(())
    }

    // -- private helpers -----------------------------------------------------

    fn where_clause(filter: &ShipmentFilter) -> &'static str {
        match filter.status() {
            Some(_) => "sellerId = $seller AND status = $status",
            None => "sellerId = $seller",
        }
    }

    async fn select<T>(&self, sql: String, filter: &ShipmentFilter) -> StorageResult<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut query = self
            .db
            .query(sql)
            .bind(("seller", filter.seller_id().0.clone()));
        if let Some(status) = filter.status() {
            query = query.bind(("status", status.as_str().to_string()));
        }

        let mut response = query.await?;
        let rows: Vec<T> = response.take(0)?;
        Ok(rows)
    }
}

#[async_trait]
impl ShipmentGateway for SurrealShipmentStore {
    #[instrument(skip(self, filter), fields(seller_id = %filter.seller_id(), status = ?filter.status()))]
    async fn find(&self, filter: &ShipmentFilter) -> StorageResult<Vec<Shipment>> {
        let sql = format!(
            "SELECT * FROM shipments WHERE {} ORDER BY id",
            Self::where_clause(filter)
        );
        let rows: Vec<ShipmentRow> = self.select(sql, filter).await?;
        debug!(rows = rows.len(), "shipments fetched");

        rows.into_iter().map(Shipment::try_from).collect()
    }

    #[instrument(skip(self, filter), fields(seller_id = %filter.seller_id(), status = ?filter.status()))]
    async fn count(&self, filter: &ShipmentFilter) -> StorageResult<u64> {
        let sql = format!(
            "SELECT count() AS total FROM shipments WHERE {} GROUP ALL",
            Self::where_clause(filter)
        );
        let rows: Vec<CountRow> = self.select(sql, filter).await?;

        // GROUP ALL yields no row at all when nothing matched
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn find_seller(&self, seller_id: &SellerId) -> StorageResult<Option<Seller>> {
        let mut response = self
            .db
            .query("SELECT * FROM sellers WHERE sellerId = $seller")
            .bind(("seller", seller_id.0.clone()))
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let rows: Vec<SellerRow> = response.take(0)?;
        Ok(rows.into_iter().next().map(Seller::from))
    }
}
