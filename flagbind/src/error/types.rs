//! Primary error enum for flag binding flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::value::ValueError;

/// Result alias used throughout the crate.
pub type FlagResult<T> = Result<T, FlagError>;

/// Errors that can occur while binding struct fields to flags.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// The flag engine rejected the command line, or help/version was requested.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A value supplied for a flag could not be converted.
    #[error("invalid value for flag '{flag}': {source}")]
    Value {
        /// Canonical name of the flag the value was destined for.
        flag: String,
        /// Conversion failure reported by the value codec.
        #[source]
        source: ValueError,
    },

    /// A field's type has no flag representation.
    #[error("flag '{flag}': type `{type_name}` is not supported")]
    UnsupportedFieldType {
        /// Name the field would have been registered under.
        flag: String,
        /// Rust type name of the rejected field.
        type_name: &'static str,
    },

    /// A flag name is empty or cannot be spelled on a command line.
    #[error("invalid flag name '{name}'")]
    InvalidFlagName {
        /// The rejected name.
        name: String,
    },

    /// A shorthand cannot be spelled as `-x`.
    #[error("invalid shorthand '{short}' for flag '{flag}'")]
    InvalidShorthand {
        /// Flag the shorthand was declared on.
        flag: String,
        /// The rejected shorthand.
        short: char,
    },

    /// Two bindings claim the same long name or alias.
    #[error("flag name '{name}' is already registered by '{existing}'")]
    DuplicateFlag {
        /// The colliding name.
        name: String,
        /// Canonical name of the binding that registered it first.
        existing: String,
    },

    /// Two bindings claim the same shorthand.
    #[error("shorthand '-{short}' is already registered by '{existing}'")]
    DuplicateShorthand {
        /// The colliding shorthand.
        short: char,
        /// Canonical name of the binding that registered it first.
        existing: String,
    },

    /// The config file type could not be determined or is not supported.
    #[error("unsupported config file type '{kind}' for '{path}'")]
    UnsupportedConfigFileType {
        /// Path (without any `type:` prefix) of the rejected file.
        path: std::path::PathBuf,
        /// The explicit type or extension that was not recognised.
        kind: String,
    },

    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: std::path::PathBuf,
        /// Underlying error reported by the file loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failure merging file values into the bound struct.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Several independent errors occurred during one parse.
    #[error("multiple flag errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
