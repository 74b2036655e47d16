use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use custlink_core::rules::{ActivityPolicy, CityRule};
use custlink_core::time::parse_utc_offset;
use custlink_core::{CatalogOptions, MatchOrder, OrderColumns, PhoneRule, SdrColumns};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "custlink";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub sources: SourcesConfig,
    pub catalog: CatalogOptions,
}

/// Default input files, used when the CLI is not given paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcesConfig {
    pub sdr: Option<PathBuf>,
    pub orders: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid activity.recency_days value: {0}")]
    InvalidRecencyDays(i64),
    #[error("invalid phone settings: {0}")]
    InvalidPhoneRule(String),
    #[error("invalid city.delimiter value: expected one character, got {0:?}")]
    InvalidCityDelimiter(String),
    #[error("invalid time.utc_offset value: {0}")]
    InvalidUtcOffset(String),
    #[error("invalid column name for columns.{section}.{field}")]
    InvalidColumnName { section: String, field: String },
    #[error("invalid sources.{0} path")]
    InvalidSourcePath(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    sources: Option<SourcesFile>,
    phone: Option<PhoneFile>,
    matching: Option<MatchingFile>,
    activity: Option<ActivityFile>,
    city: Option<CityFile>,
    time: Option<TimeFile>,
    columns: Option<ColumnsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourcesFile {
    sdr: Option<PathBuf>,
    orders: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhoneFile {
    country_code: Option<String>,
    national_digits: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatchingFile {
    order: Option<MatchOrder>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActivityFile {
    recency_days: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CityFile {
    prefer_city_column: Option<bool>,
    delimiter: Option<String>,
    segment: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimeFile {
    utc_offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnsFile {
    sdr: Option<SdrColumnsFile>,
    orders: Option<OrderColumnsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SdrColumnsFile {
    phone: Option<String>,
    name: Option<String>,
    present_address: Option<String>,
    permanent_address: Option<String>,
    alt_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrderColumnsFile {
    phone: Option<String>,
    customer_name: Option<String>,
    order_value: Option<String>,
    order_time: Option<String>,
    restaurant: Option<String>,
    delivery_address: Option<String>,
    city: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed, path.parent())?))
}

// Relative source paths are read against the directory holding the config file.
fn merge_config(parsed: ConfigFile, base_dir: Option<&Path>) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(sources) = parsed.sources {
        config.sources.sdr = sources
            .sdr
            .map(|path| resolve_source_path("sdr", path, base_dir))
            .transpose()?;
        config.sources.orders = sources
            .orders
            .map(|path| resolve_source_path("orders", path, base_dir))
            .transpose()?;
    }

    if let Some(phone) = parsed.phone {
        let current = config.catalog.policy.phone.clone();
        let country_code = match phone.country_code {
            Some(code) => Some(code),
            None => current.country_code().map(str::to_string),
        };
        let national_digits = phone
            .national_digits
            .unwrap_or_else(|| current.national_digits());
        config.catalog.policy.phone = PhoneRule::new(country_code.as_deref(), national_digits)
            .map_err(|err| ConfigError::InvalidPhoneRule(err.to_string()))?;
    }

    if let Some(matching) = parsed.matching {
        if let Some(order) = matching.order {
            config.catalog.match_order = order;
        }
    }

    if let Some(activity) = parsed.activity {
        if let Some(days) = activity.recency_days {
            config.catalog.policy.activity =
                ActivityPolicy::new(days).map_err(|_| ConfigError::InvalidRecencyDays(days))?;
        }
    }

    if let Some(city) = parsed.city {
        let mut rule = CityRule::default();
        if let Some(prefer) = city.prefer_city_column {
            rule.prefer_city_column = prefer;
        }
        if let Some(delimiter) = city.delimiter {
            let mut chars = delimiter.chars();
            rule.delimiter = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => return Err(ConfigError::InvalidCityDelimiter(delimiter)),
            };
        }
        if let Some(segment) = city.segment {
            rule.segment = segment;
        }
        config.catalog.policy.city = rule;
    }

    if let Some(time) = parsed.time {
        if let Some(offset) = time.utc_offset {
            config.catalog.utc_offset =
                parse_utc_offset(&offset).map_err(|_| ConfigError::InvalidUtcOffset(offset))?;
        }
    }

    if let Some(columns) = parsed.columns {
        if let Some(sdr) = columns.sdr {
            merge_sdr_columns(&mut config.catalog.sdr_columns, sdr)?;
        }
        if let Some(orders) = columns.orders {
            merge_order_columns(&mut config.catalog.order_columns, orders)?;
        }
    }

    Ok(config)
}

fn resolve_source_path(name: &str, path: PathBuf, base_dir: Option<&Path>) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidSourcePath(name.to_string()));
    }
    match base_dir {
        Some(base) if path.is_relative() => Ok(base.join(path)),
        _ => Ok(path),
    }
}

fn merge_sdr_columns(columns: &mut SdrColumns, file: SdrColumnsFile) -> Result<()> {
    let section = "sdr";
    set_column(&mut columns.phone, file.phone, section, "phone")?;
    set_column(&mut columns.name, file.name, section, "name")?;
    set_column(
        &mut columns.present_address,
        file.present_address,
        section,
        "present_address",
    )?;
    set_column(
        &mut columns.permanent_address,
        file.permanent_address,
        section,
        "permanent_address",
    )?;
    set_column(&mut columns.alt_number, file.alt_number, section, "alt_number")?;
    Ok(())
}

fn merge_order_columns(columns: &mut OrderColumns, file: OrderColumnsFile) -> Result<()> {
    let section = "orders";
    set_column(&mut columns.phone, file.phone, section, "phone")?;
    set_column(
        &mut columns.customer_name,
        file.customer_name,
        section,
        "customer_name",
    )?;
    set_column(&mut columns.order_value, file.order_value, section, "order_value")?;
    set_column(&mut columns.order_time, file.order_time, section, "order_time")?;
    set_column(&mut columns.restaurant, file.restaurant, section, "restaurant")?;
    set_column(
        &mut columns.delivery_address,
        file.delivery_address,
        section,
        "delivery_address",
    )?;
    set_column(&mut columns.city, file.city, section, "city")?;
    set_column(&mut columns.latitude, file.latitude, section, "latitude")?;
    set_column(&mut columns.longitude, file.longitude, section, "longitude")?;
    Ok(())
}

fn set_column(target: &mut String, value: Option<String>, section: &str, field: &str) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidColumnName {
            section: section.to_string(),
            field: field.to_string(),
        });
    }
    *target = value;
    Ok(())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
