use crate::domain::PhoneKey;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("index {index} out of range for catalog of {count} profiles")]
    IndexOutOfRange { index: i64, count: usize },
    #[error("page {page} out of range for catalog of {count} profiles")]
    PageOutOfRange { page: i64, count: usize },
    #[error("cannot aggregate profile {key}: no {missing} records")]
    AggregationInvariant {
        key: PhoneKey,
        missing: MissingSide,
    },
    #[error("invalid recency window days: {0}")]
    InvalidRecencyDays(i64),
    #[error("invalid national digit count: {0}")]
    InvalidNationalDigits(usize),
    #[error("invalid country code: {0}")]
    InvalidCountryCode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSide {
    Contact,
    Order,
}

impl std::fmt::Display for MissingSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingSide::Contact => f.write_str("contact"),
            MissingSide::Order => f.write_str("order"),
        }
    }
}
