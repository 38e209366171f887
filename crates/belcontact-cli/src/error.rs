use anyhow::Error;
use belcontact_config::ConfigError;
use belcontact_core::CoreError;
use belcontact_store::error::{StoreError, StoreErrorKind};
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
    ExitCode::from(exit_status_for(err))
}

/// The first recognised error in the chain decides the status.
fn exit_status_for(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            };
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return store_exit_code(store_err);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if cause.downcast_ref::<CoreError>().is_some() {
            return EXIT_INVALID_INPUT;
        }
    }
    EXIT_FAILURE
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::NotFound => EXIT_NOT_FOUND,
        StoreErrorKind::Rejected | StoreErrorKind::InvalidDataPath | StoreErrorKind::Core => {
            EXIT_INVALID_INPUT
        }
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::Sql
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::EmptyBootstrapSentinel
        | ConfigError::EmptyMessage(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

#[cfg(test)]
mod tests {
    use super::{exit_status_for, invalid_input, not_found};
    use anyhow::Context as _;
    use belcontact_config::ConfigError;
    use belcontact_store::error::StoreError;

    #[test]
    fn rejections_are_invalid_input() {
        let err =
            anyhow::Error::from(StoreError::Rejected(vec!["Invalid email address.".into()]));
        assert_eq!(exit_status_for(&err), 3);
    }

    #[test]
    fn store_not_found_survives_context() {
        let result: Result<(), StoreError> = Err(StoreError::NotFound("person 4".into()));
        let err = result.context("show person").unwrap_err();
        assert_eq!(exit_status_for(&err), 2);
    }

    #[test]
    fn cli_and_config_errors_map_to_codes() {
        assert_eq!(exit_status_for(&not_found("x")), 2);
        assert_eq!(exit_status_for(&invalid_input("x")), 3);
        let err = anyhow::Error::from(ConfigError::EmptyBootstrapSentinel);
        assert_eq!(exit_status_for(&err), 3);
        assert_eq!(exit_status_for(&anyhow::anyhow!("boom")), 1);
    }
}
