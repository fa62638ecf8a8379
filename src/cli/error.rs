//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::from(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Replay(_) => crate::exitcode::NOINPUT,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                    ApplicationError::NoTerms => crate::exitcode::NOINPUT,
                    ApplicationError::DataSourcesUnavailable(_) => crate::exitcode::UNAVAILABLE,
                    ApplicationError::UnknownDataSource { .. } | ApplicationError::Config { .. } => {
                        crate::exitcode::CONFIG
                    }
                    ApplicationError::OperationFailed { .. } => crate::exitcode::CANTCREAT,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CliError::Usage("x".into()), crate::exitcode::USAGE)]
    #[case(CliError::from(ApplicationError::NoTerms), crate::exitcode::NOINPUT)]
    #[case(CliError::from(DomainError::Encoding("a|b".into())), crate::exitcode::DATAERR)]
    #[case(
        CliError::from(ApplicationError::UnknownDataSource { title: "X".into(), available: String::new() }),
        crate::exitcode::CONFIG
    )]
    fn given_error_when_mapping_then_sysexits_code(#[case] err: CliError, #[case] code: i32) {
        assert_eq!(err.exit_code(), code);
    }
}
