use crate::domain::{ContactRecord, OrderRecord};
use crate::time::parse_timestamp;
use chrono::FixedOffset;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: BTreeMap<String, (String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: &str, value: impl Into<String>) {
        self.fields.insert(
            normalize_header(header),
            (header.to_string(), value.into()),
        );
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        let (_, value) = self.fields.get(&normalize_header(header))?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn has_column(&self, header: &str) -> bool {
        self.fields.contains_key(&normalize_header(header))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .values()
            .map(|(header, value)| (header.as_str(), value.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = RawRow::new();
        for (header, value) in iter {
            row.insert(header.as_ref(), value);
        }
        row
    }
}

pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdrColumns {
    pub phone: String,
    pub name: String,
    pub present_address: String,
    pub permanent_address: String,
    pub alt_number: String,
}

impl Default for SdrColumns {
    fn default() -> Self {
        Self {
            phone: "MOBILE NO".to_string(),
            name: "FIRST NAME".to_string(),
            present_address: "PRESENT ADDRESS".to_string(),
            permanent_address: "PERMANENT ADDRESS".to_string(),
            alt_number: "ALTERNATE NUMBER".to_string(),
        }
    }
}

impl SdrColumns {
    fn known(&self) -> [&str; 5] {
        [
            self.phone.as_str(),
            self.name.as_str(),
            self.present_address.as_str(),
            self.permanent_address.as_str(),
            self.alt_number.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderColumns {
    pub phone: String,
    pub customer_name: String,
    pub order_value: String,
    pub order_time: String,
    pub restaurant: String,
    pub delivery_address: String,
    pub city: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for OrderColumns {
    fn default() -> Self {
        Self {
            phone: "user_phone_number".to_string(),
            customer_name: "user_name".to_string(),
            order_value: "order_value".to_string(),
            order_time: "order_time".to_string(),
            restaurant: "restaurant_name".to_string(),
            delivery_address: "delivery_address".to_string(),
            city: "city_name".to_string(),
            latitude: "user_saved_latitude".to_string(),
            longitude: "user_saved_longitude".to_string(),
        }
    }
}

impl OrderColumns {
    fn required(&self) -> [&str; 5] {
        [
            self.phone.as_str(),
            self.restaurant.as_str(),
            self.order_value.as_str(),
            self.order_time.as_str(),
            self.delivery_address.as_str(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ConvertedRows<T> {
    pub records: Vec<T>,
    pub warnings: Vec<String>,
}

pub fn convert_contacts(rows: &[RawRow], columns: &SdrColumns) -> ConvertedRows<ContactRecord> {
    let mut warnings = Vec::new();
    report_missing_columns("sdr", rows, &[columns.phone.as_str()], &mut warnings);

    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| contact_from_row(index, row, columns))
        .collect();
    ConvertedRows { records, warnings }
}

pub fn convert_orders(
    rows: &[RawRow],
    columns: &OrderColumns,
    offset: FixedOffset,
) -> ConvertedRows<OrderRecord> {
    let mut warnings = Vec::new();
    report_missing_columns("orders", rows, &columns.required(), &mut warnings);

    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| order_from_row(index, row, columns, offset, &mut warnings))
        .collect();
    ConvertedRows { records, warnings }
}

pub fn contact_from_row(index: usize, row: &RawRow, columns: &SdrColumns) -> ContactRecord {
    let owned = |header: &str| row.get(header).map(str::to_string);
    let known: Vec<String> = columns.known().iter().map(|h| normalize_header(h)).collect();

    let mut extra = BTreeMap::new();
    for (header, value) in row.iter() {
        let value = value.trim();
        if value.is_empty() || known.contains(&normalize_header(header)) {
            continue;
        }
        extra.insert(header.to_string(), value.to_string());
    }

    ContactRecord {
        row: index,
        phone: owned(&columns.phone).unwrap_or_default(),
        name: owned(&columns.name),
        present_address: owned(&columns.present_address),
        permanent_address: owned(&columns.permanent_address),
        alt_number: owned(&columns.alt_number),
        extra,
    }
}

pub fn order_from_row(
    index: usize,
    row: &RawRow,
    columns: &OrderColumns,
    offset: FixedOffset,
    warnings: &mut Vec<String>,
) -> OrderRecord {
    let owned = |header: &str| row.get(header).map(str::to_string);

    let order_value = match row.get(&columns.order_value) {
        Some(raw) => parse_amount(raw).unwrap_or_else(|| {
            warnings.push(format!("orders row {index}: invalid order value: {raw}"));
            0.0
        }),
        None => {
            warnings.push(format!("orders row {index}: missing order value"));
            0.0
        }
    };

    let order_time_raw = owned(&columns.order_time).unwrap_or_default();
    let ordered_at = match parse_timestamp(&order_time_raw, offset) {
        Ok(ts) => Some(ts),
        Err(err) => {
            warnings.push(format!("orders row {index}: {err}"));
            None
        }
    };

    let mut coordinate = |header: &str, label: &str| -> Option<f64> {
        let raw = row.get(header)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                warnings.push(format!("orders row {index}: invalid {label}: {raw}"));
                None
            }
        }
    };
    let latitude = coordinate(&columns.latitude, "latitude");
    let longitude = coordinate(&columns.longitude, "longitude");

    OrderRecord {
        row: index,
        phone: owned(&columns.phone).unwrap_or_default(),
        customer_name: owned(&columns.customer_name),
        restaurant: owned(&columns.restaurant).unwrap_or_default(),
        order_value,
        ordered_at,
        order_time_raw,
        delivery_address: owned(&columns.delivery_address).unwrap_or_default(),
        city: owned(&columns.city),
        latitude,
        longitude,
    }
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    let mut cleaned = raw.trim().to_ascii_lowercase().replace('₹', "");
    for marker in ["inr", "rs.", "rs"] {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned.retain(|ch| ch != ',' && !ch.is_whitespace());

    let value: f64 = cleaned.parse().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

fn report_missing_columns(
    source: &str,
    rows: &[RawRow],
    headers: &[&str],
    warnings: &mut Vec<String>,
) {
    if rows.is_empty() {
        return;
    }
    for header in headers {
        if !rows.iter().any(|row| row.has_column(header)) {
            warnings.push(format!("{source}: column not found: {header}"));
        }
    }
}
