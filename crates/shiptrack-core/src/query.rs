//! Seller-scoped read queries over the shipment store.
//!
//! [`QueryService`] validates the seller scope, fetches or counts through an
//! injected [`ShipmentGateway`], and hands the records to the pure
//! functions in [`crate::aggregation`]. It holds nothing but the gateway
//! handle, so one instance can serve any number of concurrent requests.

use std::sync::Arc;

use shipment_store::{SellerId, ShipmentFilter, ShipmentGateway, ShipmentStatus};
use tracing::{debug, Instrument};

use crate::aggregation;
use crate::domain::{Result, StatusCounts, ValidationError};
use crate::obs;
use crate::response::{
    failure_response, AlertsResponse, AnalyticsResponse, Operation, Reply, StatsResponse,
};

/// Read-only query surface over a [`ShipmentGateway`].
pub struct QueryService<G: ?Sized> {
    gateway: Arc<G>,
}

impl<G: ?Sized> Clone for QueryService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// Treat a missing, empty or whitespace-only seller id as absent.
pub fn require_seller(seller_id: Option<&str>) -> std::result::Result<SellerId, ValidationError> {
    match seller_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(SellerId::from(id)),
        _ => Err(ValidationError::MissingSellerId),
    }
}

impl<G> QueryService<G>
where
    G: ShipmentGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Monthly shipment volume for one seller.
    pub async fn analytics(&self, seller_id: Option<&str>) -> Result<AnalyticsResponse> {
        let seller = require_seller(seller_id)?;

        let records = self.gateway.find(&ShipmentFilter::seller(seller.clone())).await?;
        let analytics = aggregation::monthly_volume(&records);

        obs::emit_query_served(Operation::Analytics, seller.as_str(), records.len() as u64);
        Ok(AnalyticsResponse {
            success: true,
            analytics,
        })
    }

    /// Total, pending and completed counts for one seller.
    ///
    /// Issues three independent count queries; no transaction spans them.
    pub async fn stats(&self, seller_id: Option<&str>) -> Result<StatsResponse> {
        let seller = require_seller(seller_id)?;
        let scope = ShipmentFilter::seller(seller.clone());

        let total = self.gateway.count(&scope).await?;
        let pending = self
            .gateway
            .count(&scope.clone().with_status(ShipmentStatus::Pending))
            .await?;
        let completed = self
            .gateway
            .count(&scope.with_status(ShipmentStatus::Completed))
            .await?;
        debug!(total, pending, completed, "counts fetched");

        obs::emit_query_served(Operation::Stats, seller.as_str(), total);
        Ok(StatsResponse {
            success: true,
            counts: StatusCounts {
                total,
                pending,
                completed,
            },
        })
    }

    /// One warning per pending shipment of one seller.
    pub async fn alerts(&self, seller_id: Option<&str>) -> Result<AlertsResponse> {
        let seller = require_seller(seller_id)?;

        let pending = self
            .gateway
            .find(&ShipmentFilter::seller(seller.clone()).with_status(ShipmentStatus::Pending))
            .await?;
        let alerts = aggregation::pending_alerts(&pending);

        obs::emit_query_served(Operation::Alerts, seller.as_str(), pending.len() as u64);
        Ok(AlertsResponse {
            success: true,
            alerts,
        })
    }

    /// Run `operation` and shape the outcome into a [`Reply`].
    ///
    /// Every failure goes through [`failure_response`].
    pub async fn handle(&self, operation: Operation, seller_id: Option<&str>) -> Reply {
        async move {
            let outcome = match operation {
                Operation::Analytics => self
                    .analytics(seller_id)
                    .await
                    .map(|body| Reply::ok(operation, &body)),
                Operation::Stats => self
                    .stats(seller_id)
                    .await
                    .map(|body| Reply::ok(operation, &body)),
                Operation::Alerts => self
                    .alerts(seller_id)
                    .await
                    .map(|body| Reply::ok(operation, &body)),
            };
            outcome.unwrap_or_else(|err| failure_response(operation, &err))
        }
        .instrument(obs::query_span(operation, seller_id))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_seller_rejects_absent_and_blank() {
        assert_eq!(require_seller(None), Err(ValidationError::MissingSellerId));
        assert_eq!(require_seller(Some("")), Err(ValidationError::MissingSellerId));
        assert_eq!(require_seller(Some("   ")), Err(ValidationError::MissingSellerId));
    }

    #[test]
    fn require_seller_trims() {
        assert_eq!(require_seller(Some(" s-9 ")), Ok(SellerId::from("s-9")));
    }
}
