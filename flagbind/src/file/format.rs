//! Selection of the decoder for a configuration source.

use camino::{Utf8Path, Utf8PathBuf};

use crate::{FlagError, FlagResult};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON, with comments permitted.
    Json,
    /// YAML.
    Yaml,
    /// TOML.
    Toml,
    /// INI with `[section]` tables.
    Ini,
}

impl ConfigFormat {
    /// Match a type prefix or file extension, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" | "jsonc" | "json5" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" | "tml" => Some(Self::Toml),
            "ini" => Some(Self::Ini),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Ini => "ini",
        }
    }
}

/// Split a config source into its format and path.
///
/// A `type:` prefix naming a known format wins; otherwise the extension is
/// used. Any other prefix before `:` is kept as part of the path.
///
/// # Examples
///
/// ```
/// use flagbind::{ConfigFormat, resolve_source};
/// let (format, path) = resolve_source("yaml:settings.conf").unwrap();
/// assert_eq!(format, ConfigFormat::Yaml);
/// assert_eq!(path, "settings.conf");
/// ```
///
/// # Errors
///
/// Returns [`FlagError::UnsupportedConfigFileType`] when neither the prefix
/// nor the extension names a supported format.
pub fn resolve_source(source: &str) -> FlagResult<(ConfigFormat, Utf8PathBuf)> {
    if let Some((prefix, path)) = source.split_once(':')
        && let Some(format) = ConfigFormat::from_name(prefix)
    {
        return Ok((format, Utf8PathBuf::from(path)));
    }
    let path = Utf8Path::new(source);
    let extension = path.extension().unwrap_or_default();
    ConfigFormat::from_name(extension)
        .map(|format| (format, path.to_path_buf()))
        .ok_or_else(|| FlagError::UnsupportedConfigFileType {
            path: path.as_std_path().to_path_buf(),
            kind: extension.to_owned(),
        })
}
