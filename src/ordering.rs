//! Display ordering of rows by countdown urgency.

use crate::countdown::CountdownStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Key is seconds left, with respawned and idle rows at zero. Those rows
    /// therefore come first, ahead of every running countdown.
    #[default]
    RemainingTime,
    /// Running countdowns first (soonest first), then everything else.
    ActiveFirst,
}

/// Sort key for one row under `policy`. Lower sorts earlier.
pub fn sort_key(status: &CountdownStatus, policy: SortPolicy) -> (u8, i64) {
    match policy {
        SortPolicy::RemainingTime => (0, status.seconds_left()),
        SortPolicy::ActiveFirst if status.is_counting() => (0, status.seconds_left()),
        SortPolicy::ActiveFirst => (1, 0),
    }
}

/// Returns catalog indices in display order. The sort is stable, so rows
/// with equal keys keep catalog order.
pub fn sort_rows(statuses: &[CountdownStatus], policy: SortPolicy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..statuses.len()).collect();
    order.sort_by_key(|&row| sort_key(&statuses[row], policy));
    order
}
