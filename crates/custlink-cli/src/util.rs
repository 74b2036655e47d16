use anyhow::Result;
use chrono::FixedOffset;
use custlink_core::time::{format_timestamp_datetime, now_utc, parse_timestamp};

/// `--now` when given, read like an order time; the system clock otherwise.
pub fn resolve_now(raw: Option<&str>, offset: FixedOffset) -> Result<i64> {
    match raw {
        Some(value) => Ok(parse_timestamp(value, offset)?),
        None => Ok(now_utc()),
    }
}

pub fn format_amount(value: f64) -> String {
    format!("₹{:.2}", value)
}

pub fn format_optional_datetime(ts: Option<i64>, offset: FixedOffset) -> String {
    match ts {
        Some(ts) => format_timestamp_datetime(ts, offset),
        None => "-".to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => "-",
    }
}

/// Rounds to cents for display and JSON, matching how averages are shown on pages.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
