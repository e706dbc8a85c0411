use anyhow::Error;
use huduma_config::ConfigError;
use huduma_core::time::TimeParseError;
use huduma_core::CoreError;
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
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            };
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return EXIT_INVALID_INPUT;
        }
        if let Some(_parse_err) = cause.downcast_ref::<TimeParseError>() {
            return EXIT_INVALID_INPUT;
        }
        if let Some(_json_err) = cause.downcast_ref::<serde_json::Error>() {
            return EXIT_INVALID_INPUT;
        }
    }
    EXIT_FAILURE
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidDateFormat(_)
        | ConfigError::InvalidStatusKey(_)
        | ConfigError::DuplicateStatusKey(_)
        | ConfigError::EmptyStatusClass { .. }
        | ConfigError::EmptyDefaultClass
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        exit_status, invalid_input, not_found, EXIT_FAILURE, EXIT_INVALID_INPUT, EXIT_NOT_FOUND,
    };
    use anyhow::Context as _;
    use huduma_core::domain::CanonicalPhone;

    #[test]
    fn exit_status_for_cli_errors() {
        assert_eq!(exit_status(&invalid_input("bad")), EXIT_INVALID_INPUT);
        assert_eq!(exit_status(&not_found("gone")), EXIT_NOT_FOUND);
    }

    #[test]
    fn exit_status_for_wrapped_core_error() {
        let err = CanonicalPhone::parse("12")
            .context("parse phone")
            .unwrap_err();
        assert_eq!(exit_status(&err), EXIT_INVALID_INPUT);
    }

    #[test]
    fn exit_status_for_unknown_error_is_failure() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(exit_status(&err), EXIT_FAILURE);
    }
}
