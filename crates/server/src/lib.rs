//! Tracking for phone-number "chips" used in messaging operations.
//!
//! Numbers move through lifecycle statuses, collect an event log from which
//! block/recovery statistics are derived, and can carry restriction alarms
//! that turn into notifications once the number is expected back.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::ChipStore;

pub mod alarms;
pub mod api;
pub mod config;
pub mod entity;
pub mod error;
pub mod stats;
pub mod store;
pub mod utils;
pub mod validation;

#[derive(Clone, Debug)]
pub struct AppResources {
    pub store: ChipStore,
    pub config: Arc<AppConfig>,
}
