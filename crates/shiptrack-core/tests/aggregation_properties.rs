//! Property tests for the aggregation functions.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use shipment_store::{SellerId, Shipment, ShipmentStatus};
use shiptrack_core::{monthly_volume, pending_alerts, status_counts};

fn arb_status() -> impl Strategy<Value = ShipmentStatus> {
    prop_oneof![
        Just(ShipmentStatus::Pending),
        Just(ShipmentStatus::Shipped),
        Just(ShipmentStatus::Delivered),
        Just(ShipmentStatus::Completed),
    ]
}

fn arb_shipment() -> impl Strategy<Value = Shipment> {
    (
        "[A-Z0-9]{1,8}",
        "[A-Za-z ]{1,12}",
        arb_status(),
        proptest::option::of((2020i32..2026, 1u32..=12, 1u32..=28)),
    )
        .prop_map(|(order, destination, status, created)| {
            let shipment = Shipment::new(SellerId::from("p"), order, destination, status);
            match created {
                Some((y, m, d)) => {
                    shipment.with_created_at(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
                }
                None => shipment,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: monthly buckets account for exactly the dated shipments.
    #[test]
    fn property_monthly_sum_equals_dated_records(records in proptest::collection::vec(arb_shipment(), 0..40)) {
        let dated = records.iter().filter(|s| s.created_at.is_some()).count() as u64;
        let summed: u64 = monthly_volume(&records).iter().map(|m| m.shipments).sum();
        prop_assert_eq!(summed, dated);
    }

    /// PROPERTY: each month label appears at most once and at most twelve exist.
    #[test]
    fn property_months_are_unique(records in proptest::collection::vec(arb_shipment(), 0..40)) {
        let volume = monthly_volume(&records);
        let mut labels: Vec<&str> = volume.iter().map(|m| m.month.as_str()).collect();
        let before = labels.len();
        labels.sort();
        labels.dedup();
        prop_assert_eq!(labels.len(), before);
        prop_assert!(before <= 12);
        prop_assert!(volume.iter().all(|m| m.shipments > 0));
    }

    /// PROPERTY: one alert per pending shipment, naming its order and destination.
    #[test]
    fn property_alert_per_pending_record(records in proptest::collection::vec(arb_shipment(), 0..40)) {
        let pending: Vec<&Shipment> = records
            .iter()
            .filter(|s| s.status == ShipmentStatus::Pending)
            .collect();
        let alerts = pending_alerts(&records);

        prop_assert_eq!(alerts.len(), pending.len());
        for (alert, shipment) in alerts.iter().zip(pending) {
            prop_assert_eq!(&alert.id, &shipment.id);
            prop_assert!(alert.message.contains(&shipment.order_id));
            prop_assert!(alert.message.contains(&shipment.destination));
        }
    }

    /// PROPERTY: total bounds pending + completed from above.
    #[test]
    fn property_total_bounds_pending_and_completed(records in proptest::collection::vec(arb_shipment(), 0..40)) {
        let counts = status_counts(&records);
        prop_assert_eq!(counts.total, records.len() as u64);
        prop_assert!(counts.total >= counts.pending + counts.completed);
    }

    /// PROPERTY: aggregation is idempotent.
    #[test]
    fn property_aggregation_is_idempotent(records in proptest::collection::vec(arb_shipment(), 0..40)) {
        prop_assert_eq!(monthly_volume(&records), monthly_volume(&records));
        prop_assert_eq!(status_counts(&records), status_counts(&records));
        prop_assert_eq!(pending_alerts(&records), pending_alerts(&records));
    }
}
