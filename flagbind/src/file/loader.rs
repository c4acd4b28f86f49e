//! Reading a configuration file and merging it into a bound struct.

use std::io::ErrorKind;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use figment::Figment;
#[cfg(any(feature = "json", feature = "toml"))]
use figment::providers::Format;
use figment::providers::Serialized;
#[cfg(feature = "json")]
use figment_json5::Json5;
use serde::{Serialize, de::DeserializeOwned};

use super::error::file_error;
#[cfg(not(all(feature = "json", feature = "yaml", feature = "toml")))]
use super::error::feature_disabled;
use super::format::{ConfigFormat, resolve_source};
use super::ini::Ini;
#[cfg(feature = "yaml")]
use super::yaml::SaphyrYaml;
use crate::{FlagError, FlagResult};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Read `path` through `cap-std`, mapping absence to `None`.
fn read_optional(path: &Utf8Path) -> FlagResult<Option<String>> {
    let file_name = path.file_name().ok_or_else(|| {
        file_error(
            path,
            std::io::Error::other("cannot determine file name for configuration file path"),
        )
    })?;
    let read = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name));
    match read {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(file_error(path, err)),
    }
}

/// Layer the decoded file over `figment`.
fn merge_format(
    figment: Figment,
    format: ConfigFormat,
    path: &Utf8Path,
    contents: String,
) -> FlagResult<Figment> {
    match format {
        ConfigFormat::Json => {
            #[cfg(feature = "json")]
            {
                Ok(figment.merge(Json5::string(&contents)))
            }
            #[cfg(not(feature = "json"))]
            {
                Err(feature_disabled(path, "json"))
            }
        }
        ConfigFormat::Yaml => {
            #[cfg(feature = "yaml")]
            {
                Ok(figment.merge(SaphyrYaml::string(path, contents)))
            }
            #[cfg(not(feature = "yaml"))]
            {
                Err(feature_disabled(path, "yaml"))
            }
        }
        ConfigFormat::Toml => {
            #[cfg(feature = "toml")]
            {
                // Validate first so syntax errors carry the file path.
                toml::from_str::<toml::Value>(&contents).map_err(|e| file_error(path, e))?;
                Ok(figment.merge(figment::providers::Toml::string(&contents)))
            }
            #[cfg(not(feature = "toml"))]
            {
                Err(feature_disabled(path, "toml"))
            }
        }
        ConfigFormat::Ini => {
            let ini = Ini::parse(path, &contents).map_err(|e| file_error(path, e))?;
            Ok(figment.merge(ini))
        }
    }
}

/// Merge a configuration file into `dest`.
///
/// `source` is a path, optionally prefixed with `json:`, `yaml:`, `toml:` or
/// `ini:`. Keys present in the file replace the corresponding fields; keys
/// absent from the file leave the current values untouched. Returns
/// `Ok(false)` when the file does not exist.
///
/// # Examples
///
/// ```rust,no_run
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Config {
///     host: String,
///     port: u16,
/// }
///
/// # fn run() -> flagbind::FlagResult<()> {
/// let mut config = Config { host: "localhost".into(), port: 80 };
/// if flagbind::load_config_file("toml:/etc/app/config", &mut config)? {
///     println!("loaded {}:{}", config.host, config.port);
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`FlagError::UnsupportedConfigFileType`] for unknown formats,
/// [`FlagError::File`] when the file cannot be read or decoded, and
/// [`FlagError::Gathering`] when the merged values do not fit `T`.
pub fn load_config_file<T>(source: &str, dest: &mut T) -> FlagResult<bool>
where
    T: Serialize + DeserializeOwned,
{
    let (format, path) = resolve_source(source)?;
    let Some(contents) = read_optional(&path)? else {
        tracing::debug!(path = %path, "config file not found; skipping");
        return Ok(false);
    };
    let figment = merge_format(Figment::from(Serialized::defaults(&*dest)), format, &path, contents)?;
    *dest = figment.extract().map_err(FlagError::gathering)?;
    tracing::debug!(path = %path, format = format.name(), "merged config file");
    Ok(true)
}
