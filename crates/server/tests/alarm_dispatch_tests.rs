//! One dispatcher pass against a real schema.

mod common;

use chip_tracker::alarms::{dispatch_due_alarms, notify_alarm};
use chip_tracker::entity::notification::NotificationType;
use common::{seed_alarm, seed_number, seed_operation, test_store};
use time::{Duration, OffsetDateTime};

#[tokio::test]
async fn due_alarms_become_notifications() {
    let store = test_store().await;
    let op = seed_operation(&store, 1, "Launch").await;
    let number = seed_number(&store, 1, op.id, "+5511900000070").await;
    let other = seed_number(&store, 2, op.id, "+5511900000071").await;

    let due = seed_alarm(&store, 1, number.id, Duration::minutes(-30)).await;
    let due_other_user = seed_alarm(&store, 2, other.id, Duration::minutes(-5)).await;
    let pending = seed_alarm(&store, 1, number.id, Duration::hours(6)).await;

    let dispatched = dispatch_due_alarms(&store, OffsetDateTime::now_utc())
        .await
        .unwrap();
    assert_eq!(dispatched, 2);

    let notifications = store.get_notifications_by_user_id(1, 50).await.unwrap();
    assert_eq!(notifications.len(), 1);
    let n = &notifications[0];
    assert_eq!(n.notification_type, NotificationType::RestrictionReturn);
    assert_eq!(n.alarm_id, Some(due.id));
    assert_eq!(n.phone_number_id, Some(number.id));
    assert!(n.play_sound);
    assert!(n.message.contains("+5511900000070"));

    assert_eq!(
        store.get_notifications_by_user_id(2, 50).await.unwrap()[0].alarm_id,
        Some(due_other_user.id)
    );

    let due = store.get_alarm_by_id(due.id).await.unwrap().unwrap();
    assert!(due.was_notified);
    assert!(!due.is_active);
    assert!(due.notified_at.is_some());

    let pending = store.get_alarm_by_id(pending.id).await.unwrap().unwrap();
    assert!(pending.is_pending());
}

#[tokio::test]
async fn second_pass_does_not_notify_twice() {
    let store = test_store().await;
    let op = seed_operation(&store, 1, "Launch").await;
    let number = seed_number(&store, 1, op.id, "+5511900000072").await;
    seed_alarm(&store, 1, number.id, Duration::minutes(-1)).await;

    let now = OffsetDateTime::now_utc();
    assert_eq!(dispatch_due_alarms(&store, now).await.unwrap(), 1);
    assert_eq!(dispatch_due_alarms(&store, now).await.unwrap(), 0);
    assert_eq!(
        store.get_notifications_by_user_id(1, 50).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn alarm_for_deleted_number_still_notifies() {
    let store = test_store().await;
    // number 404 never existed
    let alarm = seed_alarm(&store, 1, 404, Duration::minutes(-1)).await;

    assert_eq!(
        dispatch_due_alarms(&store, OffsetDateTime::now_utc())
            .await
            .unwrap(),
        1
    );
    let notifications = store.get_unread_notifications(1).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].alarm_id, Some(alarm.id));
}

#[tokio::test]
async fn alarm_notified_elsewhere_is_not_counted() {
    let store = test_store().await;
    let op = seed_operation(&store, 1, "Launch").await;
    let number = seed_number(&store, 1, op.id, "+5511900000073").await;
    let alarm = seed_alarm(&store, 1, number.id, Duration::minutes(-1)).await;

    // snapshot taken before a concurrent dispatcher marks the alarm
    let stale = store.get_alarms_to_notify(OffsetDateTime::now_utc()).await.unwrap();
    assert_eq!(stale.len(), 1);
    let first = store.mark_alarm_as_notified(alarm.id).await.unwrap().unwrap();

    assert!(!notify_alarm(&store, &stale[0]).await.unwrap());
    assert!(store.get_notifications_by_user_id(1, 50).await.unwrap().is_empty());
    let after = store.get_alarm_by_id(alarm.id).await.unwrap().unwrap();
    assert_eq!(after.notified_at, first.notified_at);
}
