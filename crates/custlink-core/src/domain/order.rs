use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub row: usize,
    pub phone: String,
    pub customer_name: Option<String>,
    pub restaurant: String,
    pub order_value: f64,
    pub ordered_at: Option<i64>,
    pub order_time_raw: String,
    pub delivery_address: String,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl OrderRecord {
    pub fn new(row: usize, phone: impl Into<String>, order_value: f64) -> Self {
        Self {
            row,
            phone: phone.into(),
            customer_name: None,
            restaurant: String::new(),
            order_value,
            ordered_at: None,
            order_time_raw: String::new(),
            delivery_address: String::new(),
            city: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn at(mut self, ordered_at: i64) -> Self {
        self.ordered_at = Some(ordered_at);
        self
    }

    pub fn delivered_to(mut self, address: impl Into<String>) -> Self {
        self.delivery_address = address.into();
        self
    }
}
