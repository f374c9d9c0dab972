//! SurrealDB schema migrations and initialization
//!
//! Sets up the `shipments` and `sellers` tables with their field
//! assertions and indexes. Every statement is `IF NOT EXISTS`, so running
//! the migrations against an initialised database is a no-op.

use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::storage_traits::StorageResult;

/// Initialize all shipment tracking tables in SurrealDB
///
/// Called once per connection by the gateway constructors.
pub async fn init_schema(db: &Surreal<Any>) -> StorageResult<()> {
    info!("Initializing shipment store schema");

    init_sellers_table(db).await?;
    init_shipments_table(db).await?;

    info!("Shipment store schema initialization complete");
    Ok(())
}

async fn run(db: &Surreal<Any>, sql: &'static str) -> StorageResult<()> {
    db.query(sql)
        .await
        .and_then(|response| response.check())
        .map_err(|e| StorageError::SchemaSetup(e.to_string()))?;
    Ok(())
}

/// Initialize `shipments` table
///
/// Schema:
/// ```text
/// TABLE shipments {
///   shipmentId:   STRING (unique)
///   orderId:      STRING
///   productType:  STRING
///   weight:       FLOAT (kg)
///   destination:  STRING
///   status:       STRING (Pending | Shipped | Delivered | Completed)
///   cost:         FLOAT
///   sellerId:     STRING (indexed)
///   createdAt:    DATETIME?
/// }
/// ```
///
/// Readers only ever filter on `sellerId` and `(sellerId, status)`.
///
/// Record ids are integers drawn from the `shipment_sequence:insertion`
/// counter, so `ORDER BY id` is insertion order.
async fn init_shipments_table(db: &Surreal<Any>) -> StorageResult<()> {
    debug!("Initializing shipments table");

    let sql = r#"
        DEFINE TABLE IF NOT EXISTS shipments SCHEMALESS
            PERMISSIONS
                FOR select, create, update FULL,
                FOR delete NONE;

        DEFINE FIELD IF NOT EXISTS status ON TABLE shipments TYPE string
            ASSERT $value INSIDE ["Pending", "Shipped", "Delivered", "Completed"];
        DEFINE FIELD IF NOT EXISTS createdAt ON TABLE shipments TYPE option<datetime>;

        DEFINE INDEX IF NOT EXISTS idx_shipment_id ON TABLE shipments COLUMNS shipmentId UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_seller_id ON TABLE shipments COLUMNS sellerId;
        DEFINE INDEX IF NOT EXISTS idx_seller_status ON TABLE shipments COLUMNS sellerId, status;

        DEFINE TABLE IF NOT EXISTS shipment_sequence SCHEMALESS;
    "#;

    run(db, sql).await?;
    info!("✓ shipments table initialized");
    Ok(())
}

/// Initialize `sellers` table
async fn init_sellers_table(db: &Surreal<Any>) -> StorageResult<()> {
    debug!("Initializing sellers table");

    let sql = r#"
        DEFINE TABLE IF NOT EXISTS sellers SCHEMALESS
            PERMISSIONS
                FOR select, create, update FULL,
                FOR delete NONE;

        DEFINE INDEX IF NOT EXISTS idx_seller_id ON TABLE sellers COLUMNS sellerId UNIQUE;
    "#;

    run(db, sql).await?;
    info!("✓ sellers table initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{connect, StoreLocation};

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let db = connect(&StoreLocation::Memory).await.unwrap();
        init_schema(&db).await.unwrap();
        init_schema(&db).await.unwrap();
    }

    #[tokio::test]
    async fn status_outside_the_closed_set_is_rejected_on_write() {
        let db = connect(&StoreLocation::Memory).await.unwrap();
        init_schema(&db).await.unwrap();

        let result = db
            .query("CREATE shipments SET sellerId = 's-1', status = 'Returned'")
            .await
            .unwrap()
            .check();
        assert!(result.is_err());
    }
}
