use chip_tracker::entity::event::{self, EventType};
use chip_tracker::entity::phone_number::{self, PhoneStatus};
use chip_tracker::stats::{DashboardStats, PhoneNumberStats};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use time::Duration;
use time::macros::datetime;

// CI-friendly benchmark configuration
fn is_ci_mode() -> bool {
    std::env::var("CI").is_ok() || std::env::var("QUICK_BENCH").is_ok()
}

fn event_log(len: usize) -> Vec<event::Model> {
    let start = datetime!(2025-01-01 00:00 UTC);
    (0..len)
        .map(|i| {
            let event_type = match i % 4 {
                0 => EventType::Block,
                1 => EventType::Unblock,
                2 => EventType::VolumeRecord,
                _ => EventType::StatusChange,
            };
            let at = start + Duration::hours(i as i64);
            event::Model {
                id: i as i32,
                phone_number_id: 1,
                event_type,
                previous_status: None,
                new_status: None,
                message_volume: Some((i % 1000) as i32),
                description: None,
                metadata: None,
                event_date: at,
                created_at: at,
            }
        })
        .collect()
}

fn numbers(len: usize) -> Vec<phone_number::Model> {
    let at = datetime!(2025-01-01 00:00 UTC);
    let statuses = [
        PhoneStatus::Active,
        PhoneStatus::Warming,
        PhoneStatus::Blocked,
        PhoneStatus::Analysis,
        PhoneStatus::Off,
        PhoneStatus::Restricted,
        PhoneStatus::Unknown,
    ];
    (0..len)
        .map(|i| phone_number::Model {
            id: i as i32,
            number: format!("+55119{i:08}"),
            operator: None,
            device_type: None,
            device: None,
            status: statuses[i % statuses.len()],
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
        })
        .collect()
}

fn benchmark_event_stats(c: &mut Criterion) {
    let len = if is_ci_mode() { 1_000 } else { 50_000 };
    let events = event_log(len);

    c.bench_function("phone_number_stats_from_events", |b| {
        b.iter(|| {
            let stats = PhoneNumberStats::from_events(black_box(&events));
            black_box(stats);
        });
    });
}

fn benchmark_dashboard(c: &mut Criterion) {
    let len = if is_ci_mode() { 1_000 } else { 20_000 };
    let numbers = numbers(len);

    c.bench_function("dashboard_from_numbers", |b| {
        b.iter(|| {
            let dashboard = DashboardStats::from_numbers(black_box(numbers.clone()));
            black_box(dashboard);
        });
    });
}

criterion_group!(benches, benchmark_event_stats, benchmark_dashboard);
criterion_main!(benches);
