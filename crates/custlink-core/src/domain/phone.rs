use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COUNTRY_CODE: &str = "91";
pub const DEFAULT_NATIONAL_DIGITS: usize = 10;
pub const MAX_NATIONAL_DIGITS: usize = 15;

#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PhoneKey(String);

impl PhoneKey {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PhoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneRule {
    country_code: Option<String>,
    national_digits: usize,
}

impl Default for PhoneRule {
    fn default() -> Self {
        Self {
            country_code: Some(DEFAULT_COUNTRY_CODE.to_string()),
            national_digits: DEFAULT_NATIONAL_DIGITS,
        }
    }
}

impl PhoneRule {
    pub fn new(country_code: Option<&str>, national_digits: usize) -> Result<Self, CoreError> {
        if national_digits == 0 || national_digits > MAX_NATIONAL_DIGITS {
            return Err(CoreError::InvalidNationalDigits(national_digits));
        }

        let country_code = match country_code.map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let code = raw.strip_prefix('+').unwrap_or(raw);
                if code.is_empty()
                    || code.len() > 3
                    || code.starts_with('0')
                    || !code.chars().all(|ch| ch.is_ascii_digit())
                {
                    return Err(CoreError::InvalidCountryCode(raw.to_string()));
                }
                Some(code.to_string())
            }
        };

        Ok(Self {
            country_code,
            national_digits,
        })
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn national_digits(&self) -> usize {
        self.national_digits
    }

    pub fn normalize(&self, raw: &str) -> PhoneKey {
        let trimmed = raw.trim();
        let digits = match integral_literal(trimmed) {
            Some(value) => value,
            None => strip_zero_fraction(trimmed)
                .chars()
                .filter(|ch| ch.is_ascii_digit())
                .collect(),
        };

        let mut key = digits.trim_start_matches('0');
        if let Some(code) = self.country_code.as_deref() {
            if let Some(rest) = key.strip_prefix(code) {
                if rest.len() >= self.national_digits {
                    key = rest.trim_start_matches('0');
                }
            }
        }

        PhoneKey(key.to_string())
    }

    pub fn display(&self, key: &PhoneKey) -> String {
        match self.country_code.as_deref() {
            Some(code) if key.as_str().len() == self.national_digits => {
                format!("+{code}{key}")
            }
            _ => key.to_string(),
        }
    }
}

pub fn normalize_phone(raw: &str) -> PhoneKey {
    PhoneRule::default().normalize(raw)
}

// Spreadsheet exports render numeric phone cells as `6364682957.0` or `9.16E+11`.
fn integral_literal(value: &str) -> Option<String> {
    if !value.contains(['.', 'e', 'E']) {
        return None;
    }
    if !value
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    let parsed: f64 = value.parse().ok()?;
    if !parsed.is_finite() || parsed.fract() != 0.0 || parsed.abs() >= 1e15 {
        return None;
    }
    Some(format!("{:.0}", parsed.abs()))
}

// `+91 6364682957.0`: a formatted cell that still carries the spreadsheet fraction.
fn strip_zero_fraction(value: &str) -> &str {
    match value.rsplit_once('.') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b == b'0') => head,
        _ => value,
    }
}
