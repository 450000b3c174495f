//! Query layer over the chip tracking schema.
//!
//! [`ChipStore`] is handed to callers explicitly. A store built without a
//! connection is "unavailable": every method returns its empty shape (`None`,
//! an empty `Vec`, `0`, `false`) instead of failing. Errors from a configured
//! connection are passed through as [`DbErr`](sea_orm::DbErr).

use sea_orm::DatabaseConnection;
use std::sync::Arc;

mod alarms;
mod analytics;
mod dashboard;
mod events;
mod notifications;
mod operations;
mod phone_numbers;
mod system_alerts;
mod tags;
mod users;

pub use alarms::{AlarmPatch, AlarmWithPhoneNumber, NewAlarm};
pub use analytics::DEFAULT_VOLUME_HISTORY_DAYS;
pub use events::{DEFAULT_RECENT_EVENTS_LIMIT, NewEvent};
pub use notifications::{DEFAULT_NOTIFICATIONS_LIMIT, NewNotification};
pub use operations::{NewOperation, OperationPatch};
pub use phone_numbers::{NewPhoneNumber, PhoneNumberPatch, PhoneNumberSearch};
pub use system_alerts::NewSystemAlert;
pub use tags::NewTag;
pub use users::{NewUser, UserProfilePatch};

#[derive(Clone, Debug, Default)]
pub struct ChipStore {
    db: Option<Arc<DatabaseConnection>>,
}

impl ChipStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db: Some(db) }
    }

    /// A store with no storage behind it.
    pub fn unavailable() -> Self {
        Self { db: None }
    }

    pub fn is_available(&self) -> bool {
        self.db.is_some()
    }

    fn conn(&self) -> Option<&DatabaseConnection> {
        let db = self.db.as_deref();
        if db.is_none() {
            tracing::debug!(
                name = "store.unavailable",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                message = "Storage not configured, returning empty result"
            );
        }
        db
    }
}
