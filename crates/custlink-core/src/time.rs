use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use thiserror::Error;

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

const COMPACT_DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";
const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

// Serial day 25569 is 1970-01-01; smaller serials are not order times.
const SERIAL_DAY_MIN: f64 = 25_569.0;
const SERIAL_DAY_LIMIT: f64 = 100_000.0;
// Unix seconds below 1e9 predate 2001-09-09.
const SECONDS_MIN: f64 = 1e9;
const MILLIS_THRESHOLD: f64 = 1e12;
const MILLIS_LIMIT: f64 = 1e15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid timestamp: {0}")]
    InvalidDateTime(String),
    #[error("invalid utc offset: expected +HH:MM, got {0}")]
    InvalidOffset(String),
}

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("zero offset is valid")
}

pub fn parse_utc_offset(input: &str) -> Result<FixedOffset, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(utc());
    }

    let invalid = || TimeParseError::InvalidOffset(trimmed.to_string());
    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|ch| *ch != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

pub fn parse_timestamp(input: &str, offset: FixedOffset) -> Result<i64, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp());
    }

    if let Some(ts) = compact_timestamp(trimmed, offset) {
        return ts;
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        return numeric_timestamp(value, offset)
            .ok_or_else(|| TimeParseError::InvalidDateTime(trimmed.to_string()));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return naive_to_utc_timestamp(dt, offset);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            let naive = date
                .and_hms_opt(0, 0, 0)
                .ok_or(TimeParseError::InvalidDate)?;
            return naive_to_utc_timestamp(naive, offset);
        }
    }

    Err(TimeParseError::InvalidDateTime(trimmed.to_string()))
}

pub fn format_timestamp_datetime(ts: i64, offset: FixedOffset) -> String {
    to_offset(ts, offset).format("%Y-%m-%d %H:%M").to_string()
}

fn to_offset(ts: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&offset)
}

// `20240115` and `20240115134500` would otherwise read as unix seconds.
fn compact_timestamp(input: &str, offset: FixedOffset) -> Option<Result<i64, TimeParseError>> {
    if !input.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    match input.len() {
        14 => NaiveDateTime::parse_from_str(input, COMPACT_DATETIME_FORMAT)
            .ok()
            .map(|dt| naive_to_utc_timestamp(dt, offset)),
        8 => NaiveDate::parse_from_str(input, COMPACT_DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| naive_to_utc_timestamp(dt, offset)),
        _ => None,
    }
}

fn numeric_timestamp(value: f64, offset: FixedOffset) -> Option<i64> {
    if !value.is_finite() || value < SERIAL_DAY_MIN {
        return None;
    }

    if value < SERIAL_DAY_LIMIT {
        let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
        let millis = (value * 86_400_000.0).round() as i64;
        let naive = base.checked_add_signed(Duration::milliseconds(millis))?;
        return naive_to_utc_timestamp(naive, offset).ok();
    }

    if value >= MILLIS_LIMIT || value < SECONDS_MIN {
        return None;
    }
    if value >= MILLIS_THRESHOLD {
        return Some((value / 1000.0).floor() as i64);
    }
    Some(value.floor() as i64)
}

fn naive_to_utc_timestamp(
    naive: NaiveDateTime,
    offset: FixedOffset,
) -> Result<i64, TimeParseError> {
    let local = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or(TimeParseError::InvalidDate)?;
    Ok(local.with_timezone(&Utc).timestamp())
}
