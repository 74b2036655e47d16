use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub row: usize,
    pub phone: String,
    pub name: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub alt_number: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ContactRecord {
    pub fn new(row: usize, phone: impl Into<String>) -> Self {
        Self {
            row,
            phone: phone.into(),
            name: None,
            present_address: None,
            permanent_address: None,
            alt_number: None,
            extra: BTreeMap::new(),
        }
    }
}
