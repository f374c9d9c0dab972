//! Shipment-Store: record store gateway for shipment tracking
//!
//! This crate owns all I/O against the shipment/seller document store. The
//! summary layer above it only sees the read-only [`ShipmentGateway`] trait.
//!
//! ## Key Components
//!
//! - `ShipmentGateway`: filtered find/count over shipment records
//! - `MemoryShipmentStore`: in-memory fake, insertion-ordered
//! - `SurrealShipmentStore`: SurrealDB adapter (memory, cloud, URL, local disk)
//! - `StoreLocation`: environment-driven connection target

mod error;
pub mod fakes;
mod handle;
mod migrations;
mod schema;
pub mod storage_traits;
pub mod surreal_gateway;

pub use error::StorageError;
pub use handle::{connect, CloudConfig, StoreLocation};
pub use schema::{SellerRow, ShipmentRow};
pub use storage_traits::{
    Seller, SellerId, Shipment, ShipmentFilter, ShipmentGateway, ShipmentId, ShipmentStatus,
    StorageResult,
};
pub use surreal_gateway::SurrealShipmentStore;
