//! Analytics derived from a phone number's event log.
//!
//! Everything here is a pure function over rows already loaded from storage,
//! so the same code backs [`crate::store::ChipStore::get_phone_number_stats`]
//! and the tests.

use crate::entity::event::{self, EventType};
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

pub mod dashboard;

pub use dashboard::{DashboardStats, StatusBuckets};

const MILLIS_PER_HOUR: i128 = 3_600_000;

/// Summary figures for one phone number, computed from its events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PhoneNumberStats {
    pub block_count: u64,
    pub restriction_count: u64,
    /// Mean block to unblock gap in whole hours; `None` when no block was ever lifted.
    pub avg_recovery_time_hours: Option<i64>,
    pub max_daily_volume: i32,
    pub total_events: u64,
}

impl PhoneNumberStats {
    #[tracing::instrument(skip_all, fields(events = events.len()))]
    pub fn from_events(events: &[event::Model]) -> Self {
        Self {
            block_count: count_of_type(events, EventType::Block),
            restriction_count: count_of_type(events, EventType::Restriction),
            avg_recovery_time_hours: average_recovery_hours(events),
            max_daily_volume: max_daily_volume(events),
            total_events: events.len() as u64,
        }
    }
}

pub fn count_of_type(events: &[event::Model], event_type: EventType) -> u64 {
    events.iter().filter(|e| e.event_type == event_type).count() as u64
}

/// Largest `message_volume` over `volume_record` events, 0 when there are none.
pub fn max_daily_volume(events: &[event::Model]) -> i32 {
    events
        .iter()
        .filter(|e| e.event_type == EventType::VolumeRecord)
        .filter_map(|e| e.message_volume)
        .max()
        .unwrap_or(0)
}

/// Average time from a block to the unblock that follows it, in hours rounded half up.
///
/// Events are scanned in `event_date` order (ties broken by id). A block
/// replaces any block still waiting for its unblock; an unblock without a
/// pending block is ignored, as is a trailing block that was never lifted.
pub fn average_recovery_hours(events: &[event::Model]) -> Option<i64> {
    let mut ordered: Vec<&event::Model> = events
        .iter()
        .filter(|e| matches!(e.event_type, EventType::Block | EventType::Unblock))
        .collect();
    ordered.sort_by_key(|e| (e.event_date, e.id));

    let gaps = recovery_gaps(ordered.iter().map(|e| (e.event_type, e.event_date)));
    let pairs = gaps.len() as i128;
    if pairs == 0 {
        return None;
    }
    let total_ms: i128 = gaps.iter().map(|gap| gap.whole_milliseconds()).sum();

    Some(round_half_up(total_ms, pairs * MILLIS_PER_HOUR) as i64)
}

/// Pairs each block with the next unblock. Input must already be chronological.
pub fn recovery_gaps(
    events: impl IntoIterator<Item = (EventType, OffsetDateTime)>,
) -> Vec<time::Duration> {
    let mut pending_block: Option<OffsetDateTime> = None;
    let mut gaps = Vec::new();

    for (event_type, at) in events {
        match event_type {
            EventType::Block => pending_block = Some(at),
            EventType::Unblock => {
                if let Some(blocked_at) = pending_block.take() {
                    gaps.push(at - blocked_at);
                }
            }
            _ => {}
        }
    }

    gaps
}

/// `numerator / denominator` rounded half up (towards +inf). `denominator` must be positive.
fn round_half_up(numerator: i128, denominator: i128) -> i128 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use time::macros::datetime;

    fn ev(id: i32, event_type: EventType, hours: i64) -> event::Model {
        let at = datetime!(2025-03-01 00:00 UTC) + Duration::hours(hours);
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

    fn volume(id: i32, amount: i32) -> event::Model {
        event::Model {
            message_volume: Some(amount),
            ..ev(id, EventType::VolumeRecord, id as i64)
        }
    }

    #[test]
    fn recovery_of_two_episodes_rounds_half_up() {
        let events = vec![
            ev(1, EventType::Block, 0),
            ev(2, EventType::Unblock, 5),
            ev(3, EventType::Block, 10),
            ev(4, EventType::Unblock, 22),
        ];
        // (5 + 12) / 2 = 8.5h
        assert_eq!(average_recovery_hours(&events), Some(9));
    }

    #[test]
    fn recovery_is_none_without_pairs() {
        assert_eq!(average_recovery_hours(&[]), None);
        assert_eq!(average_recovery_hours(&[ev(1, EventType::Block, 0)]), None);
        assert_eq!(average_recovery_hours(&[ev(1, EventType::Unblock, 3)]), None);
    }

    #[test]
    fn recovery_ignores_trailing_block() {
        let events = vec![
            ev(1, EventType::Block, 0),
            ev(2, EventType::Unblock, 4),
            ev(3, EventType::Block, 10),
        ];
        assert_eq!(average_recovery_hours(&events), Some(4));
    }

    #[test]
    fn consecutive_blocks_keep_only_the_latest() {
        let events = vec![
            ev(1, EventType::Block, 0),
            ev(2, EventType::Block, 6),
            ev(3, EventType::Unblock, 8),
        ];
        assert_eq!(average_recovery_hours(&events), Some(2));
    }

    #[test]
    fn recovery_sorts_by_event_date_not_insertion_order() {
        let events = vec![
            ev(3, EventType::Unblock, 7),
            ev(1, EventType::Block, 1),
            ev(2, EventType::Note, 2),
        ];
        assert_eq!(average_recovery_hours(&events), Some(6));
    }

    #[test]
    fn unblock_before_any_block_is_skipped() {
        let events = vec![
            ev(1, EventType::Unblock, 0),
            ev(2, EventType::Block, 1),
            ev(3, EventType::Unblock, 4),
            ev(4, EventType::Unblock, 9),
        ];
        assert_eq!(average_recovery_hours(&events), Some(3));
    }

    #[test]
    fn rounding_goes_down_below_half() {
        let start = datetime!(2025-03-01 00:00 UTC);
        let gaps = recovery_gaps([
            (EventType::Block, start),
            (EventType::Unblock, start + Duration::minutes(89)),
        ]);
        assert_eq!(gaps, vec![Duration::minutes(89)]);
        assert_eq!(round_half_up(89 * 60_000, MILLIS_PER_HOUR), 1);
        assert_eq!(round_half_up(90 * 60_000, MILLIS_PER_HOUR), 2);
    }

    #[test]
    fn max_volume_only_counts_volume_records() {
        let mut note = ev(10, EventType::Note, 1);
        note.message_volume = Some(9_999);
        let events = vec![volume(1, 120), volume(2, 480), volume(3, 300), note];
        assert_eq!(max_daily_volume(&events), 480);
        assert_eq!(max_daily_volume(&[]), 0);
    }

    #[test]
    fn stats_from_events_aggregates_everything() {
        let events = vec![
            ev(1, EventType::Block, 0),
            ev(2, EventType::Restriction, 1),
            ev(3, EventType::Unblock, 3),
            ev(4, EventType::Restriction, 5),
            volume(5, 250),
        ];
        let stats = PhoneNumberStats::from_events(&events);
        assert_eq!(
            stats,
            PhoneNumberStats {
                block_count: 1,
                restriction_count: 2,
                avg_recovery_time_hours: Some(3),
                max_daily_volume: 250,
                total_events: 5,
            }
        );
    }
}
