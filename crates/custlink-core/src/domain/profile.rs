use crate::domain::{ContactRecord, OrderRecord, PhoneKey};
use crate::rules::ActivityStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_orders: usize,
    pub total_order_value: f64,
    pub average_order_value: f64,
    pub primary_city: Option<String>,
    pub first_order_at: Option<i64>,
    pub last_order_at: Option<i64>,
    pub activity_status: ActivityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub key: PhoneKey,
    pub display_phone: String,
    pub customer_name: Option<String>,
    pub contacts: Vec<ContactRecord>,
    pub orders: Vec<OrderRecord>,
    pub summary: SummaryMetrics,
}
