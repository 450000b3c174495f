pub mod event;
pub mod notification;
pub mod operation;
pub mod phone_number;
pub mod phone_number_tag;
pub mod restriction_alarm;
pub mod system_alert;
pub mod tag;
pub mod user;
