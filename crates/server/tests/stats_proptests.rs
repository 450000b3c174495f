//! Properties of the event-log analytics and the dashboard breakdown.

use chip_tracker::entity::event::{self, EventType};
use chip_tracker::entity::phone_number::{self, PhoneStatus};
use chip_tracker::stats::{DashboardStats, average_recovery_hours};
use proptest::prelude::*;
use sea_orm::Iterable;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

fn event_at(id: i32, event_type: EventType, at: OffsetDateTime) -> event::Model {
    event::Model {
        id,
        phone_number_id: 1,
        event_type,
        previous_status: None,
        new_status: None,
        message_volume: None,
        description: None,
        metadata: None,
        event_date: at,
        created_at: at,
    }
}

/// Block/unblock pairs laid out one after another: `(idle_minutes, blocked_minutes)`.
fn episodes(pairs: &[(i64, i64)]) -> Vec<event::Model> {
    let mut at = datetime!(2025-01-01 00:00 UTC);
    let mut events = Vec::new();
    for (i, (idle, blocked)) in pairs.iter().enumerate() {
        at += Duration::minutes(*idle);
        events.push(event_at(2 * i as i32, EventType::Block, at));
        at += Duration::minutes(*blocked);
        events.push(event_at(2 * i as i32 + 1, EventType::Unblock, at));
    }
    events
}

fn number(id: i32, status: PhoneStatus) -> phone_number::Model {
    let at = datetime!(2025-01-01 00:00 UTC);
    phone_number::Model {
        id,
        number: format!("+55119{id:08}"),
        operator: None,
        device_type: None,
        device: None,
        status,
        account_type: None,
        purpose: None,
        notes: None,
        location: None,
        region: None,
        last_ip: None,
        ip_change_frequency: None,
        owner: None,
        purchase_batch: None,
        activation_date: None,
        risk_score: Some(50),
        tier: None,
        total_messages: Some(0),
        total_blocks: Some(0),
        total_restrictions: Some(0),
        avg_recovery_hours: None,
        last_block_date: None,
        last_restriction_date: None,
        added_at: at,
        updated_at: at,
        user_id: 1,
        operation_id: 1,
    }
}

fn any_status() -> impl Strategy<Value = PhoneStatus> {
    prop::sample::select(PhoneStatus::iter().collect::<Vec<_>>())
}

proptest! {
    /// Average equals total blocked minutes over pair count, in hours, rounded half up.
    #[test]
    fn prop_recovery_matches_integer_average(
        pairs in prop::collection::vec((0i64..600, 0i64..10_000), 1..20)
    ) {
        let events = episodes(&pairs);
        let total: i64 = pairs.iter().map(|(_, blocked)| blocked).sum();
        let n = pairs.len() as i64;
        // minutes -> hours: total / (60 n), half up
        let expected = (2 * total + 60 * n).div_euclid(120 * n);
        prop_assert_eq!(average_recovery_hours(&events), Some(expected));
    }

    /// Input order does not matter; events are scanned by date.
    #[test]
    fn prop_recovery_ignores_input_order(
        (pairs, shuffled) in prop::collection::vec((1i64..600, 1i64..10_000), 1..12)
            .prop_flat_map(|pairs| {
                let events = episodes(&pairs);
                (Just(pairs), Just(events).prop_shuffle())
            })
    ) {
        prop_assert_eq!(
            average_recovery_hours(&shuffled),
            average_recovery_hours(&episodes(&pairs))
        );
    }

    /// Without any unblock there is nothing to average.
    #[test]
    fn prop_blocks_alone_have_no_recovery(hours in prop::collection::vec(0i64..1_000, 0..20)) {
        let start = datetime!(2025-01-01 00:00 UTC);
        let events: Vec<_> = hours
            .iter()
            .enumerate()
            .map(|(i, h)| event_at(i as i32, EventType::Block, start + Duration::hours(*h)))
            .collect();
        prop_assert_eq!(average_recovery_hours(&events), None);
    }

    /// Every number lands in exactly the bucket of its own status.
    #[test]
    fn prop_dashboard_partitions_numbers(statuses in prop::collection::vec(any_status(), 0..60)) {
        let numbers: Vec<_> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| number(i as i32, *s))
            .collect();
        let dashboard = DashboardStats::from_numbers(numbers);

        prop_assert_eq!(dashboard.total, statuses.len());
        prop_assert_eq!(dashboard.by_status.len(), statuses.len());
        for status in PhoneStatus::iter() {
            let bucket = dashboard.by_status.bucket(status);
            prop_assert_eq!(bucket.len(), statuses.iter().filter(|s| **s == status).count());
            prop_assert!(bucket.iter().all(|n| n.status == status));
        }
    }
}
