use crate::entity::notification::NotificationType;
use crate::entity::{phone_number, restriction_alarm};
use crate::store::{ChipStore, NewNotification};
use sea_orm::DbErr;
use time::OffsetDateTime;

/// Builds the notification announcing that a restricted number should be usable again.
pub fn restriction_return_notification(
    alarm: &restriction_alarm::Model,
    phone_number: Option<&phone_number::Model>,
) -> NewNotification {
    let number = phone_number
        .map(|p| p.number.as_str())
        .unwrap_or("A restricted number");
    NewNotification {
        user_id: alarm.user_id,
        phone_number_id: Some(alarm.phone_number_id),
        alarm_id: Some(alarm.id),
        notification_type: NotificationType::RestrictionReturn,
        title: "Number back from restriction".to_string(),
        message: format!("{number} is expected to be available again."),
        play_sound: Some(true),
    }
}

/// Notifies every alarm due at `now` and returns how many were handled.
///
/// An alarm is only marked notified after its notification was stored. A
/// failure on one alarm is logged and the alarm stays pending for the next
/// pass; failing to load the due set is returned to the caller.
#[tracing::instrument(skip(store))]
pub async fn dispatch_due_alarms(store: &ChipStore, now: OffsetDateTime) -> Result<usize, DbErr> {
    let due = store.get_alarms_to_notify(now).await?;
    if due.is_empty() {
        return Ok(0);
    }

    tracing::info!(
        name = "alarms.dispatch.due",
        target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
        message = "Dispatching due alarms",
        count = due.len()
    );

    let mut dispatched = 0;
    for alarm in due {
        match notify_alarm(store, &alarm).await {
            Ok(true) => dispatched += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    name = "alarms.dispatch.failed",
                    target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                    alarm_id = alarm.id,
                    error = %e,
                    message = "Failed to dispatch alarm, leaving it pending"
                );
            }
        }
    }
    Ok(dispatched)
}

/// Notifies one alarm. Returns `false` when another dispatcher got to it
/// first; the duplicate notification is then removed again.
pub async fn notify_alarm(
    store: &ChipStore,
    alarm: &restriction_alarm::Model,
) -> Result<bool, DbErr> {
    let phone_number = store.get_phone_number_by_id(alarm.phone_number_id).await?;
    let notification = restriction_return_notification(alarm, phone_number.as_ref());

    let Some(stored) = store.create_notification(notification).await? else {
        return Ok(false);
    };
    if !store.try_mark_alarm_as_notified(alarm.id).await? {
        store.delete_notification(stored.id).await?;
        tracing::debug!(
            name = "alarms.dispatch.already_notified",
            target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
            message = "Alarm was notified elsewhere, dropping duplicate",
            alarm_id = alarm.id
        );
        return Ok(false);
    }

    tracing::info!(
        name = "alarms.dispatch.notified",
        target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
        message = "Restriction alarm notified",
        alarm_id = alarm.id,
        user_id = alarm.user_id,
        phone_number_id = alarm.phone_number_id
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn alarm() -> restriction_alarm::Model {
        let at = datetime!(2025-03-01 12:00 UTC);
        restriction_alarm::Model {
            id: 7,
            phone_number_id: 3,
            user_id: 2,
            restriction_start_time: at,
            expected_return_time: at,
            notify_at: at,
            is_active: true,
            was_notified: false,
            notified_at: None,
            notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn notification_links_alarm_and_number() {
        let n = restriction_return_notification(&alarm(), None);
        assert_eq!(n.user_id, 2);
        assert_eq!(n.phone_number_id, Some(3));
        assert_eq!(n.alarm_id, Some(7));
        assert_eq!(n.notification_type, NotificationType::RestrictionReturn);
        assert_eq!(n.play_sound, Some(true));
    }

    #[tokio::test]
    async fn unavailable_store_dispatches_nothing() {
        let store = ChipStore::unavailable();
        let count = dispatch_due_alarms(&store, OffsetDateTime::now_utc())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
