use anyhow::Error;
use custlink_config::ConfigError;
use custlink_core::time::TimeParseError;
use custlink_core::CoreError;
use custlink_load::LoadError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            });
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(core_exit_code(core_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(load_err) = cause.downcast_ref::<LoadError>() {
            return ExitCode::from(load_exit_code(load_err));
        }
        if let Some(_parse_err) = cause.downcast_ref::<TimeParseError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn core_exit_code(err: &CoreError) -> u8 {
    match err {
        CoreError::IndexOutOfRange { .. } | CoreError::PageOutOfRange { .. } => EXIT_NOT_FOUND,
        CoreError::InvalidRecencyDays(_)
        | CoreError::InvalidNationalDigits(_)
        | CoreError::InvalidCountryCode(_) => EXIT_INVALID_INPUT,
        CoreError::AggregationInvariant { .. } => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidRecencyDays(_)
        | ConfigError::InvalidPhoneRule(_)
        | ConfigError::InvalidCityDelimiter(_)
        | ConfigError::InvalidUtcOffset(_)
        | ConfigError::InvalidColumnName { .. }
        | ConfigError::InvalidSourcePath(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn load_exit_code(err: &LoadError) -> u8 {
    match err {
        LoadError::Read { .. } => EXIT_FAILURE,
        LoadError::Csv(_)
        | LoadError::Json(_)
        | LoadError::Parse(_)
        | LoadError::UnsupportedFormat(_) => EXIT_INVALID_INPUT,
    }
}
