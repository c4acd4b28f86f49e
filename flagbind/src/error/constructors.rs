//! Constructors and aggregation helpers for `FlagError`.

use figment::Error as FigmentError;

use super::{AggregatedErrors, FlagError};
use crate::value::ValueError;

impl FlagError {
    /// Tries to build a [`FlagError`] from an iterator of errors.
    ///
    /// Returns `None` when no errors are supplied, the error itself when
    /// exactly one is supplied, and [`Self::Aggregate`] otherwise.
    #[must_use]
    pub fn try_aggregate<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut errors: Vec<Self> = errors.into_iter().collect();
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(errors)))),
        }
    }

    /// Build a [`FlagError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`FlagError::try_aggregate`] when the
    /// list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Attribute a codec failure to the named flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagbind::{FlagError, ValueError};
    /// let e = FlagError::value("port", ValueError::InvalidBool { value: "maybe".into() });
    /// assert!(e.to_string().contains("'port'"));
    /// ```
    #[must_use]
    pub fn value(flag: impl Into<String>, source: ValueError) -> Self {
        Self::Value {
            flag: flag.into(),
            source,
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Name of the flag this error is attributed to, if any.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        match self {
            Self::Value { flag, .. }
            | Self::UnsupportedFieldType { flag, .. }
            | Self::InvalidShorthand { flag, .. } => Some(flag),
            Self::InvalidFlagName { name } | Self::DuplicateFlag { name, .. } => Some(name),
            _ => None,
        }
    }
}
