//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chip_tracker::entity::{operation, phone_number, restriction_alarm};
use chip_tracker::store::{ChipStore, NewAlarm, NewOperation, NewPhoneNumber};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

/// Fresh in-memory database with the full schema.
pub async fn test_store() -> ChipStore {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect");
    Migrator::up(&db, None).await.expect("migrate");
    ChipStore::new(Arc::new(db))
}

pub async fn seed_operation(store: &ChipStore, user_id: i32, name: &str) -> operation::Model {
    store
        .create_operation(NewOperation {
            name: name.into(),
            description: None,
            user_id,
        })
        .await
        .expect("create operation")
        .expect("store available")
}

pub async fn seed_number(
    store: &ChipStore,
    user_id: i32,
    operation_id: i32,
    number: &str,
) -> phone_number::Model {
    store
        .create_phone_number(NewPhoneNumber {
            number: number.into(),
            user_id,
            operation_id,
            ..Default::default()
        })
        .await
        .expect("create phone number")
        .expect("store available")
}

/// Alarm whose `notify_at` is `offset` away from now (negative means already due).
pub async fn seed_alarm(
    store: &ChipStore,
    user_id: i32,
    phone_number_id: i32,
    offset: Duration,
) -> restriction_alarm::Model {
    let now = OffsetDateTime::now_utc();
    store
        .create_alarm(NewAlarm {
            phone_number_id,
            user_id,
            restriction_start_time: now - Duration::hours(24),
            expected_return_time: now + offset,
            notify_at: now + offset,
            notes: None,
        })
        .await
        .expect("create alarm")
        .expect("store available")
}
