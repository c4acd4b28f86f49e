//! Error constructors shared by file loading helpers.

use std::error::Error;

use camino::Utf8Path;

use crate::FlagError;

/// Construct a [`FlagError::File`] for a configuration path.
pub(super) fn file_error(path: &Utf8Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> FlagError {
    FlagError::File {
        path: path.as_std_path().to_path_buf(),
        source: err.into(),
    }
}

/// Error for a format whose cargo feature is switched off.
#[cfg_attr(
    all(feature = "json", feature = "yaml", feature = "toml"),
    expect(dead_code, reason = "only reachable with a format feature disabled")
)]
pub(super) fn feature_disabled(path: &Utf8Path, feature: &str) -> FlagError {
    file_error(
        path,
        std::io::Error::other(format!(
            "{feature} feature disabled: enable the '{feature}' feature to support this file format"
        )),
    )
}
