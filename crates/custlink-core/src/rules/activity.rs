use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECENCY_DAYS: i64 = 90;
pub const MAX_RECENCY_DAYS: i64 = 3650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Active,
    Inactive,
}

impl ActivityStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActivityStatus::Active => "active",
            ActivityStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityPolicy {
    recency_days: i64,
}

impl Default for ActivityPolicy {
    fn default() -> Self {
        Self {
            recency_days: DEFAULT_RECENCY_DAYS,
        }
    }
}

impl ActivityPolicy {
    pub fn new(recency_days: i64) -> Result<Self, CoreError> {
        Ok(Self {
            recency_days: validate_recency_days(recency_days)?,
        })
    }

    pub fn recency_days(&self) -> i64 {
        self.recency_days
    }

    pub fn classify(&self, now_utc: i64, last_order_at: Option<i64>) -> ActivityStatus {
        let last = match last_order_at {
            Some(value) => value,
            None => return ActivityStatus::Inactive,
        };

        let window_start = now_utc.saturating_sub(self.recency_days * 86_400);
        if last >= window_start {
            ActivityStatus::Active
        } else {
            ActivityStatus::Inactive
        }
    }
}

pub fn validate_recency_days(days: i64) -> Result<i64, CoreError> {
    if days <= 0 || days > MAX_RECENCY_DAYS {
        return Err(CoreError::InvalidRecencyDays(days));
    }
    Ok(days)
}
