//! Pure summaries over one seller's shipments.
//!
//! Every function here is deterministic: the same slice always yields the
//! same output, and nothing is cached between calls.

use chrono::{DateTime, Datelike, Utc};
use indexmap::IndexMap;
use shipment_store::{Shipment, ShipmentStatus};

use crate::domain::{Alert, AlertKind, MonthlyVolume, StatusCounts};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Abbreviated English month name of `timestamp`, evaluated in UTC.
pub fn month_label(timestamp: &DateTime<Utc>) -> &'static str {
    MONTH_LABELS[timestamp.month0() as usize]
}

/// Shipments per calendar month.
///
/// Shipments without `created_at` are skipped. Buckets are keyed by month
/// label alone, so the same month of different years shares a bucket, and
/// they come out in the order each label is first seen while scanning
/// `records`, not in calendar order.
pub fn monthly_volume(records: &[Shipment]) -> Vec<MonthlyVolume> {
    let mut buckets: IndexMap<&'static str, u64> = IndexMap::new();

    for created_at in records.iter().filter_map(|s| s.created_at.as_ref()) {
        *buckets.entry(month_label(created_at)).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(month, shipments)| MonthlyVolume {
            month: month.to_string(),
            shipments,
        })
        .collect()
}

/// Total, pending and completed counts.
pub fn status_counts(records: &[Shipment]) -> StatusCounts {
    records
        .iter()
        .fold(StatusCounts::default(), |mut counts, shipment| {
            counts.total += 1;
            match shipment.status {
                ShipmentStatus::Pending => counts.pending += 1,
                ShipmentStatus::Completed => counts.completed += 1,
                ShipmentStatus::Shipped | ShipmentStatus::Delivered => {}
            }
            counts
        })
}

/// One warning per pending shipment, in input order.
pub fn pending_alerts(records: &[Shipment]) -> Vec<Alert> {
    records
        .iter()
        .filter(|s| s.status == ShipmentStatus::Pending)
        .map(pending_alert)
        .collect()
}

fn pending_alert(shipment: &Shipment) -> Alert {
    Alert {
        id: shipment.id.clone(),
        message: format!(
            "Shipment #{} to {} is still pending.",
            shipment.order_id, shipment.destination
        ),
        kind: AlertKind::Warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shipment_store::SellerId;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 8, 30, 0).unwrap()
    }

    fn shipment(order: &str, status: ShipmentStatus) -> Shipment {
        Shipment::new(SellerId::from("seller-1"), order, "Accra", status)
    }

    #[test]
    fn month_labels_are_english_abbreviations() {
        assert_eq!(month_label(&at(2024, 1, 1)), "Jan");
        assert_eq!(month_label(&at(2024, 5, 31)), "May");
        assert_eq!(month_label(&at(2024, 9, 15)), "Sep");
        assert_eq!(month_label(&at(2024, 12, 31)), "Dec");
    }

    #[test]
    fn month_label_uses_utc() {
        // 23:30 on Jan 31st UTC is already February further east, but not here
        let late = Utc.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).unwrap();
        assert_eq!(month_label(&late), "Jan");
    }

    #[test]
    fn monthly_volume_keeps_first_seen_order() {
        let records = vec![
            shipment("1", ShipmentStatus::Pending).with_created_at(at(2024, 3, 2)),
            shipment("2", ShipmentStatus::Pending).with_created_at(at(2024, 1, 9)),
            shipment("3", ShipmentStatus::Shipped).with_created_at(at(2024, 3, 20)),
            shipment("4", ShipmentStatus::Completed).with_created_at(at(2024, 2, 1)),
        ];

        let volume = monthly_volume(&records);
        let pairs: Vec<(&str, u64)> = volume
            .iter()
            .map(|v| (v.month.as_str(), v.shipments))
            .collect();
        assert_eq!(pairs, vec![("Mar", 2), ("Jan", 1), ("Feb", 1)]);
    }

    #[test]
    fn monthly_volume_merges_same_month_across_years() {
        let records = vec![
            shipment("1", ShipmentStatus::Pending).with_created_at(at(2023, 6, 1)),
            shipment("2", ShipmentStatus::Pending).with_created_at(at(2024, 6, 1)),
        ];

        assert_eq!(
            monthly_volume(&records),
            vec![MonthlyVolume {
                month: "Jun".into(),
                shipments: 2
            }]
        );
    }

    #[test]
    fn monthly_volume_skips_records_without_creation_time() {
        let records = vec![
            shipment("1", ShipmentStatus::Pending),
            shipment("2", ShipmentStatus::Pending).with_created_at(at(2024, 4, 4)),
            shipment("3", ShipmentStatus::Pending),
        ];

        let volume = monthly_volume(&records);
        assert_eq!(volume.len(), 1);
        assert_eq!(volume[0].month, "Apr");
        assert_eq!(volume[0].shipments, 1);
    }

    #[test]
    fn status_counts_ignore_shipped_and_delivered_except_in_total() {
        let records = vec![
            shipment("1", ShipmentStatus::Pending),
            shipment("2", ShipmentStatus::Shipped),
            shipment("3", ShipmentStatus::Delivered),
            shipment("4", ShipmentStatus::Completed),
            shipment("5", ShipmentStatus::Completed),
        ];

        assert_eq!(
            status_counts(&records),
            StatusCounts {
                total: 5,
                pending: 1,
                completed: 2
            }
        );
    }

    #[test]
    fn pending_alert_message_names_order_and_destination() {
        let record = Shipment::new(SellerId::from("s"), "ORD-42", "Cape Town", ShipmentStatus::Pending);
        let alerts = pending_alerts(std::slice::from_ref(&record));

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, record.id);
        assert_eq!(
            alerts[0].message,
            "Shipment #ORD-42 to Cape Town is still pending."
        );
        assert_eq!(alerts[0].kind, AlertKind::Warning);
    }

    #[test]
    fn pending_alerts_follow_input_order_and_skip_other_statuses() {
        let records = vec![
            shipment("b", ShipmentStatus::Pending),
            shipment("x", ShipmentStatus::Delivered),
            shipment("a", ShipmentStatus::Pending),
        ];

        let messages: Vec<String> = pending_alerts(&records)
            .into_iter()
            .map(|a| a.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Shipment #b to Accra is still pending.",
                "Shipment #a to Accra is still pending."
            ]
        );
    }

    #[test]
    fn empty_input_gives_empty_summaries() {
        assert!(monthly_volume(&[]).is_empty());
        assert_eq!(status_counts(&[]), StatusCounts::default());
        assert!(pending_alerts(&[]).is_empty());
    }
}
