//! Conversions between external error types and `FlagError`.

use figment::Error as FigmentError;

use super::FlagError;

impl From<clap::Error> for FlagError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(e.into())
    }
}

impl From<FigmentError> for FlagError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(e.into())
    }
}

impl From<FlagError> for FigmentError {
    /// Allow using `?` inside `figment::Jail` closures.
    fn from(e: FlagError) -> Self {
        match e {
            FlagError::Gathering(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
