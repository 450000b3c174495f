//! Status breakdown shown on the dashboard.

use crate::entity::phone_number::{self, PhoneStatus};
use serde::Serialize;
use utoipa::ToSchema;

/// Phone numbers partitioned by status. Every number lands in exactly one bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusBuckets {
    pub active: Vec<phone_number::Model>,
    pub warming: Vec<phone_number::Model>,
    pub blocked: Vec<phone_number::Model>,
    pub analysis: Vec<phone_number::Model>,
    pub off: Vec<phone_number::Model>,
    pub restricted: Vec<phone_number::Model>,
    pub unknown: Vec<phone_number::Model>,
}

impl StatusBuckets {
    pub fn bucket(&self, status: PhoneStatus) -> &[phone_number::Model] {
        match status {
            PhoneStatus::Active => &self.active,
            PhoneStatus::Warming => &self.warming,
            PhoneStatus::Blocked => &self.blocked,
            PhoneStatus::Analysis => &self.analysis,
            PhoneStatus::Off => &self.off,
            PhoneStatus::Restricted => &self.restricted,
            PhoneStatus::Unknown => &self.unknown,
        }
    }

    fn bucket_mut(&mut self, status: PhoneStatus) -> &mut Vec<phone_number::Model> {
        match status {
            PhoneStatus::Active => &mut self.active,
            PhoneStatus::Warming => &mut self.warming,
            PhoneStatus::Blocked => &mut self.blocked,
            PhoneStatus::Analysis => &mut self.analysis,
            PhoneStatus::Off => &mut self.off,
            PhoneStatus::Restricted => &mut self.restricted,
            PhoneStatus::Unknown => &mut self.unknown,
        }
    }

    /// Sum of all bucket sizes.
    pub fn len(&self) -> usize {
        self.active.len()
            + self.warming.len()
            + self.blocked.len()
            + self.analysis.len()
            + self.off.len()
            + self.restricted.len()
            + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dashboard payload: total, per-status buckets and the flat list in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total: usize,
    pub by_status: StatusBuckets,
    pub numbers: Vec<phone_number::Model>,
}

impl DashboardStats {
    pub fn from_numbers(numbers: Vec<phone_number::Model>) -> Self {
        let mut by_status = StatusBuckets::default();
        for number in &numbers {
            by_status.bucket_mut(number.status).push(number.clone());
        }

        Self {
            total: numbers.len(),
            by_status,
            numbers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;
    use time::macros::datetime;

    fn number(id: i32, status: PhoneStatus) -> phone_number::Model {
        let at = datetime!(2025-03-01 00:00 UTC);
        phone_number::Model {
            id,
            number: format!("+5511999{id:05}"),
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
            total_messages: None,
            total_blocks: None,
            total_restrictions: None,
            avg_recovery_hours: None,
            last_block_date: None,
            last_restriction_date: None,
            added_at: at,
            updated_at: at,
            user_id: 1,
            operation_id: 1,
        }
    }

    #[test]
    fn empty_input_gives_empty_buckets() {
        let stats = DashboardStats::from_numbers(Vec::new());
        assert_eq!(stats.total, 0);
        assert!(stats.by_status.is_empty());
    }

    #[test]
    fn each_status_goes_to_its_own_bucket() {
        let numbers: Vec<_> = PhoneStatus::iter()
            .enumerate()
            .map(|(i, status)| number(i as i32, status))
            .collect();
        let stats = DashboardStats::from_numbers(numbers.clone());

        assert_eq!(stats.total, 7);
        assert_eq!(stats.numbers, numbers);
        for status in PhoneStatus::iter() {
            let bucket = stats.by_status.bucket(status);
            assert_eq!(bucket.len(), 1);
            assert_eq!(bucket[0].status, status);
        }
    }

    #[test]
    fn bucket_sizes_sum_to_total() {
        let statuses = [
            PhoneStatus::Active,
            PhoneStatus::Active,
            PhoneStatus::Blocked,
            PhoneStatus::Restricted,
            PhoneStatus::Unknown,
        ];
        let numbers = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| number(i as i32, *s))
            .collect();
        let stats = DashboardStats::from_numbers(numbers);
        assert_eq!(stats.by_status.len(), stats.total);
        assert_eq!(stats.by_status.active.len(), 2);
        assert!(stats.by_status.warming.is_empty());
    }
}
